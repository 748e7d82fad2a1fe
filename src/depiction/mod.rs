// src/depiction/mod.rs

//! Per-package depiction documents
//!
//! For every package identifier the generator maintains
//!
//! ```text
//! <depiction_dir>/<package>/depiction.json   Sileo native depiction
//! <depiction_dir>/<package>/index.html       Cydia / browser page (optional)
//! ```
//!
//! Both are generated once and never rewritten. Branding, links, images and
//! tab names come from [`DepictionTemplate`]; only the description, version
//! and the HTML page fields are taken from the package itself.

pub mod sileo;

use crate::config::RepoConfig;
use crate::error::{Error, Result};
use crate::filesystem::path::sanitize_filename;
use crate::filesystem::{self, WriteOutcome};
use crate::packages::control::ControlMetadata;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

pub use sileo::{ButtonAction, DepictionAlertView, DepictionView};

/// File name of the Sileo JSON depiction
pub const JSON_FILE_NAME: &str = "depiction.json";
/// File name of the HTML depiction
pub const HTML_FILE_NAME: &str = "index.html";

const HTML_TEMPLATE: &str = r###"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{name}}</title>
<style>
body { font-family: -apple-system, Helvetica, sans-serif; margin: 0; padding: 16px; background: #f2f2f7; }
.card { background: #fff; border-radius: 12px; padding: 16px; margin-bottom: 12px; }
h1 { font-size: 22px; margin: 0 0 4px 0; color: {{tint}}; }
.meta { color: #8e8e93; font-size: 14px; }
p { white-space: pre-wrap; }
</style>
</head>
<body>
<div class="card">
<h1>{{name}}</h1>
<div class="meta">{{#if author}}{{author}} &middot; {{/if}}{{section}}</div>
</div>
<div class="card">
<p>{{description}}</p>
</div>
<div class="card">
<div class="meta">Version {{version}}</div>
</div>
</body>
</html>
"###;

/// A table button in the depiction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinkButton {
    pub title: String,
    /// Absolute URL, or a path relative to the repository base URL
    pub url: String,
    #[serde(default = "default_true")]
    pub open_external: bool,
}

/// A button that opens an in-app alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AlertButton {
    pub title: String,
    pub alert_title: String,
    pub text: String,
    pub cancel_label: String,
}

/// A fixed image in the depiction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageSpec {
    /// Absolute URL, or a path relative to the repository base URL
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub corner_radius: u32,
}

fn default_true() -> bool {
    true
}

/// Static presentation content shared by every depiction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DepictionTemplate {
    pub tint_color: String,
    pub header_image: Option<String>,
    pub description_tab: String,
    pub changelog_tab: String,
    pub contact_tab: String,
    /// Raw markdown shown on a coloured banner at the top of the description tab
    pub banner_markdown: Option<String>,
    pub banner_color: String,
    /// Title of the button that opens the HTML page
    pub details_button: String,
    pub links: Vec<LinkButton>,
    pub alert: Option<AlertButton>,
    pub images: Vec<ImageSpec>,
    /// Markdown shown when the package has no `Description`
    pub missing_description: String,
    pub footer_images: Vec<ImageSpec>,
    /// Changelog entries; `{{version}}` expands to the package version
    pub changelog: Vec<String>,
    pub contact_heading: String,
    pub contacts: Vec<LinkButton>,
}

impl Default for DepictionTemplate {
    fn default() -> Self {
        Self {
            tint_color: "#0080ff".to_string(),
            header_image: Some("sileo.png".to_string()),
            description_tab: "Description".to_string(),
            changelog_tab: "Changelog".to_string(),
            contact_tab: "Contact".to_string(),
            banner_markdown: None,
            banner_color: "#0080ff".to_string(),
            details_button: "View package details".to_string(),
            links: Vec::new(),
            alert: None,
            images: Vec::new(),
            missing_description: "No description.".to_string(),
            footer_images: vec![ImageSpec {
                url: "CydiaIcon.png".to_string(),
                width: 200,
                height: 200,
                corner_radius: 0,
            }],
            changelog: vec!["### Version {{version}}\n- Current release".to_string()],
            contact_heading: "### Contact".to_string(),
            contacts: Vec::new(),
        }
    }
}

/// Links to a package's depiction, as written into its index record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepictionUrls {
    /// Package directory; `Depiction:` field
    pub depiction: String,
    /// JSON document; `SileoDepiction:` field
    pub sileo: String,
}

/// Result of [`DepictionGenerator::ensure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepictionOutcome {
    pub urls: DepictionUrls,
    pub json: WriteOutcome,
    /// `None` when HTML generation is disabled
    pub html: Option<WriteOutcome>,
}

/// Generates depiction documents for a repository
pub struct DepictionGenerator<'a> {
    config: &'a RepoConfig,
    pages: Handlebars<'static>,
    markdown: Handlebars<'static>,
}

impl<'a> DepictionGenerator<'a> {
    pub fn new(config: &'a RepoConfig) -> Result<Self> {
        let mut pages = Handlebars::new();
        pages
            .register_template_string("page", HTML_TEMPLATE)
            .map_err(|e| Error::Template(e.to_string()))?;

        let mut markdown = Handlebars::new();
        markdown.register_escape_fn(handlebars::no_escape);

        Ok(Self {
            config,
            pages,
            markdown,
        })
    }

    /// URLs of a package's depiction documents
    pub fn urls(&self, package_id: &str) -> DepictionUrls {
        let depiction = self.config.depiction_dir_url(package_id);
        let sileo = format!("{}{}", depiction, JSON_FILE_NAME);
        DepictionUrls { depiction, sileo }
    }

    /// Make sure the depiction documents of `package_id` exist
    ///
    /// Existing documents are left exactly as they are.
    pub fn ensure(&self, package_id: &str, control: &ControlMetadata) -> Result<DepictionOutcome> {
        let dir = self.package_dir(package_id)?;

        let json = filesystem::write_if_missing(&dir.join(JSON_FILE_NAME), || {
            self.render_json(package_id, control)
        })?;

        let html = if self.config.html {
            Some(filesystem::write_if_missing(&dir.join(HTML_FILE_NAME), || {
                self.render_html(package_id, control).map(String::into_bytes)
            })?)
        } else {
            None
        };

        if json == WriteOutcome::Created || html == Some(WriteOutcome::Created) {
            info!("Generated depiction for {}", package_id);
        }

        Ok(DepictionOutcome {
            urls: self.urls(package_id),
            json,
            html,
        })
    }

    /// Output directory for a package; rejects identifiers that are not a plain name
    fn package_dir(&self, package_id: &str) -> Result<PathBuf> {
        let name = sanitize_filename(package_id)?;
        Ok(self.config.depiction_dir.join(name))
    }

    /// Resolve a template URL against the repository base
    fn resolve(&self, url: &str) -> String {
        if url.contains("://") {
            url.to_string()
        } else {
            self.config.asset_url(url)
        }
    }

    fn image(&self, spec: &ImageSpec) -> DepictionView {
        DepictionView::DepictionImageView {
            url: self.resolve(&spec.url),
            width: spec.width,
            height: spec.height,
            alignment: 1,
            corner_radius: spec.corner_radius,
        }
    }

    fn link(&self, button: &LinkButton) -> DepictionView {
        DepictionView::link(&button.title, self.resolve(&button.url), button.open_external)
    }

    /// Build the view tree of a package's Sileo depiction
    pub fn build_view(&self, package_id: &str, control: &ControlMetadata) -> Result<DepictionView> {
        let template = &self.config.depiction;
        let tint = Some(template.tint_color.clone());

        let description_tab = {
            let mut views = Vec::new();

            if let Some(banner) = &template.banner_markdown {
                views.push(DepictionView::DepictionStackView {
                    tabname: None,
                    tint_color: None,
                    background_color: Some(template.banner_color.clone()),
                    views: vec![DepictionView::DepictionMarkdownView {
                        markdown: banner.clone(),
                        title: None,
                        tint_color: Some("#ffffff".to_string()),
                        use_raw_format: Some(true),
                        use_spacing: Some(false),
                        use_bottom_margin: None,
                        use_bold_text: None,
                    }],
                });
            }

            let mut buttons = Vec::new();
            if self.config.html {
                let page = format!("{}{}", self.urls(package_id).depiction, HTML_FILE_NAME);
                buttons.push(DepictionView::link(&template.details_button, page, false));
            }
            buttons.extend(template.links.iter().map(|link| self.link(link)));
            if let Some(alert) = &template.alert {
                buttons.push(DepictionView::DepictionTableButtonView {
                    title: alert.title.clone(),
                    action: ButtonAction::Alert(DepictionAlertView {
                        title: alert.alert_title.clone(),
                        text: alert.text.clone(),
                        cancel_button: alert.cancel_label.clone(),
                    }),
                    open_external: false,
                });
            }
            buttons.extend(template.images.iter().map(|image| self.image(image)));
            if !buttons.is_empty() {
                views.push(DepictionView::stack(buttons));
            }

            views.push(DepictionView::DepictionMarkdownView {
                markdown: control
                    .description()
                    .unwrap_or(&template.missing_description)
                    .to_string(),
                title: Some("markdown-description".to_string()),
                tint_color: None,
                use_raw_format: None,
                use_spacing: None,
                use_bottom_margin: Some(false),
                use_bold_text: Some(true),
            });
            views.push(DepictionView::DepictionSeparatorView);
            views.push(DepictionView::DepictionSpacerView { spacing: 2 });
            views.extend(template.footer_images.iter().map(|image| self.image(image)));
            views.push(DepictionView::DepictionSpacerView { spacing: 4 });

            DepictionView::DepictionStackView {
                tabname: Some(template.description_tab.clone()),
                tint_color: tint.clone(),
                background_color: None,
                views,
            }
        };

        let version = control.version().unwrap_or(&self.config.defaults.version);
        let changelog_views = template
            .changelog
            .iter()
            .map(|entry| {
                self.markdown
                    .render_template(entry, &json!({ "version": version, "package": package_id }))
                    .map(DepictionView::raw_markdown)
                    .map_err(|e| Error::Template(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let changelog_tab = DepictionView::DepictionStackView {
            tabname: Some(template.changelog_tab.clone()),
            tint_color: tint.clone(),
            background_color: None,
            views: changelog_views,
        };

        let mut contact_views = vec![DepictionView::raw_markdown(&template.contact_heading)];
        contact_views.extend(template.contacts.iter().map(|link| self.link(link)));
        let contact_tab = DepictionView::DepictionStackView {
            tabname: Some(template.contact_tab.clone()),
            tint_color: tint,
            background_color: None,
            views: contact_views,
        };

        Ok(DepictionView::DepictionTabView {
            min_version: sileo::MIN_VERSION.to_string(),
            tint_color: template.tint_color.clone(),
            header_image: template.header_image.as_deref().map(|url| self.resolve(url)),
            tabs: vec![description_tab, changelog_tab, contact_tab],
        })
    }

    /// Render the Sileo JSON document, pretty printed
    pub fn render_json(&self, package_id: &str, control: &ControlMetadata) -> Result<Vec<u8>> {
        let view = self.build_view(package_id, control)?;
        let mut out = serde_json::to_vec_pretty(&view)?;
        out.push(b'\n');
        Ok(out)
    }

    /// Render the HTML page; substituted fields are HTML-escaped
    pub fn render_html(&self, package_id: &str, control: &ControlMetadata) -> Result<String> {
        let defaults = &self.config.defaults;
        let name = control
            .get("Name")
            .filter(|name| !name.is_empty())
            .unwrap_or(package_id);

        let data = json!({
            "name": name,
            "author": control.get_or("Author", &defaults.author),
            "section": control.get_or("Section", &defaults.section),
            "description": control.get_or("Description", &defaults.description),
            "version": control.get_or("Version", &defaults.version),
            "tint": self.config.depiction.tint_color,
        });

        self.pages
            .render("page", &data)
            .map_err(|e| Error::Template(e.to_string()))
    }
}
