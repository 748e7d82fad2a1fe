// src/depiction/sileo.rs

//! Sileo native depiction view types
//!
//! Each view serializes as a JSON object whose `class` names the Sileo view.

use serde::Serialize;

/// Sileo depiction format version emitted
pub const MIN_VERSION: &str = "0.1";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "class", rename_all_fields = "camelCase")]
pub enum DepictionView {
    DepictionTabView {
        min_version: String,
        tint_color: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        header_image: Option<String>,
        tabs: Vec<DepictionView>,
    },
    DepictionStackView {
        #[serde(skip_serializing_if = "Option::is_none")]
        tabname: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tint_color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        background_color: Option<String>,
        views: Vec<DepictionView>,
    },
    DepictionMarkdownView {
        markdown: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tint_color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        use_raw_format: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        use_spacing: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        use_bottom_margin: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        use_bold_text: Option<bool>,
    },
    DepictionTableButtonView {
        title: String,
        action: ButtonAction,
        open_external: bool,
    },
    DepictionImageView {
        #[serde(rename = "URL")]
        url: String,
        width: u32,
        height: u32,
        alignment: u8,
        corner_radius: u32,
    },
    DepictionSeparatorView,
    DepictionSpacerView {
        spacing: u32,
    },
}

/// Target of a table button: a URL or an in-app alert
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ButtonAction {
    Url(String),
    Alert(DepictionAlertView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "class", rename_all = "camelCase")]
pub struct DepictionAlertView {
    pub title: String,
    pub text: String,
    pub cancel_button: String,
}

impl DepictionView {
    /// Plain markdown paragraph rendered as raw HTML-capable text
    pub fn raw_markdown(markdown: impl Into<String>) -> Self {
        Self::DepictionMarkdownView {
            markdown: markdown.into(),
            title: None,
            tint_color: None,
            use_raw_format: Some(true),
            use_spacing: None,
            use_bottom_margin: None,
            use_bold_text: None,
        }
    }

    /// Table button opening a URL
    pub fn link(title: impl Into<String>, url: impl Into<String>, open_external: bool) -> Self {
        Self::DepictionTableButtonView {
            title: title.into(),
            action: ButtonAction::Url(url.into()),
            open_external,
        }
    }

    /// Untitled vertical stack
    pub fn stack(views: Vec<DepictionView>) -> Self {
        Self::DepictionStackView {
            tabname: None,
            tint_color: None,
            background_color: None,
            views,
        }
    }
}
