//! Print the OpenAPI document as JSON.

use color_eyre::eyre::{Result, WrapErr};
use users_backend::ApiDoc;
use utoipa::OpenApi;

#[expect(clippy::print_stdout, reason = "the document is the program output")]
fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to render the OpenAPI document")?;
    println!("{json}");
    Ok(())
}
