use handlebars::Handlebars;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/templates/"]
struct Templates;

/// Creates a template registry with all embedded templates, every template is registered under
/// its file name without the `.hbs` extension.
pub fn create_templates() -> anyhow::Result<Handlebars<'static>> {
    let mut templates = Handlebars::new();
    templates.set_strict_mode(true);
    templates.register_embed_templates_with_extension::<Templates>(".hbs")?;

    Ok(templates)
}
