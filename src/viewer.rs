//! Swagger UI page and bootstrap script.
//!
//! The static viewer bundle is loaded from the swagger-ui-dist CDN; this module
//! only renders the page shell and the init script that hands the assembled
//! document to `SwaggerUIBundle`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Base URL of the swagger-ui-dist bundle
pub const SWAGGER_UI_CDN: &str = "https://unpkg.com/swagger-ui-dist@5";

/// File name of the init script, relative to the mount point
pub const INIT_SCRIPT: &str = "swagger-ui-init.js";

/// Viewer rendering options, forwarded opaquely to Swagger UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerOptions {
    /// Page title, defaults to "Swagger UI"
    pub site_title: Option<String>,
    /// Theme stylesheet URL, loaded after the base viewer stylesheet
    pub theme: Option<String>,
    /// Inline CSS appended to the page style
    pub custom_css: Option<String>,
    /// Extra stylesheet URL
    pub custom_css_url: Option<String>,
    /// Extra script URL loaded after the viewer
    pub custom_js: Option<String>,
    pub custom_favicon: Option<String>,
    /// Show the URL explorer bar
    pub explorer: bool,
    /// Merged over the default SwaggerUIBundle configuration
    pub swagger_options: Value,
}

impl ViewerOptions {
    pub fn with_site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = Some(title.into());
        self
    }

    pub fn with_theme(mut self, stylesheet_url: impl Into<String>) -> Self {
        self.theme = Some(stylesheet_url.into());
        self
    }

    pub fn with_custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    pub fn with_custom_js(mut self, url: impl Into<String>) -> Self {
        self.custom_js = Some(url.into());
        self
    }

    pub fn with_swagger_options(mut self, options: Value) -> Self {
        self.swagger_options = options;
        self
    }
}

const BASE_CSS: &str = "html{box-sizing:border-box;overflow-y:scroll;}\
*,*:before,*:after{box-sizing:inherit;}\
body{margin:0;background:#fafafa;}";

const HIDE_TOPBAR_CSS: &str = ".swagger-ui .topbar .download-url-wrapper{display:none;}";

const INIT_BODY: &str = r#"
  var spec = options.swaggerDoc;
  var swaggerOptions = Object.assign({
    spec: spec,
    dom_id: '#swagger-ui',
    deepLinking: true,
    presets: [
      SwaggerUIBundle.presets.apis,
      SwaggerUIStandalonePreset
    ],
    plugins: [
      SwaggerUIBundle.plugins.DownloadUrl
    ],
    layout: "StandaloneLayout"
  }, options.customOptions || {});
  window.ui = SwaggerUIBundle(swaggerOptions);
};
"#;

/// Render the viewer page served at the mount point
pub fn render_html(mount: &str, options: &ViewerOptions) -> String {
    let title = options.site_title.as_deref().unwrap_or("Swagger UI");
    let mut css = String::from(BASE_CSS);
    if !options.explorer {
        css.push_str(HIDE_TOPBAR_CSS);
    }
    if let Some(custom) = &options.custom_css {
        css.push_str(custom);
    }

    let mut head_extra = String::new();
    if let Some(favicon) = &options.custom_favicon {
        head_extra.push_str(&format!(
            "  <link rel=\"icon\" href=\"{}\" />\n",
            encode_double_quoted_attribute(favicon)
        ));
    }
    for url in [&options.theme, &options.custom_css_url].into_iter().flatten() {
        head_extra.push_str(&format!(
            "  <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" />\n",
            encode_double_quoted_attribute(url)
        ));
    }
    let custom_js = options
        .custom_js
        .as_ref()
        .map(|url| {
            format!(
                "  <script src=\"{}\"></script>\n",
                encode_double_quoted_attribute(url)
            )
        })
        .unwrap_or_default();
    let init = format!("{}/{}", mount.trim_end_matches('/'), INIT_SCRIPT);

    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
  <meta charset=\"UTF-8\">\n\
  <title>{title}</title>\n\
  <link rel=\"stylesheet\" type=\"text/css\" href=\"{cdn}/swagger-ui.css\" />\n\
{head_extra}\
  <style>{css}</style>\n\
</head>\n\
<body>\n\
  <div id=\"swagger-ui\"></div>\n\
  <script src=\"{cdn}/swagger-ui-bundle.js\"></script>\n\
  <script src=\"{cdn}/swagger-ui-standalone-preset.js\"></script>\n\
  <script src=\"{init}\"></script>\n\
{custom_js}\
</body>\n\
</html>\n",
        title = encode_text(title),
        cdn = SWAGGER_UI_CDN,
        head_extra = head_extra,
        css = css,
        init = encode_double_quoted_attribute(&init),
        custom_js = custom_js,
    )
}

/// Render the bootstrap script embedding the document.
///
/// `document_json` must be the serialized document.
pub fn render_init_script(document_json: &Value, options: &ViewerOptions) -> String {
    let payload = json!({
        "swaggerDoc": document_json,
        "customOptions": options.swagger_options,
    });
    // keep "</script>" inside string literals from closing an inline script tag
    let payload = payload.to_string().replace("</", "<\\/");
    format!("window.onload = function () {{\n  var options = {};\n{}", payload, INIT_BODY.trim_start_matches('\n'))
}
