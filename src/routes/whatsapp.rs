//! WhatsApp link route handler

use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::whatsapp::{self, MessageBlock, OrderMessageVars};

/// Request to build a follow-up link for an order
#[derive(Debug, Deserialize)]
pub struct WhatsappLinkRequest {
    pub phone: String,
    /// CMS template body; takes precedence over `template`
    #[serde(default)]
    pub blocks: Vec<MessageBlock>,
    /// Plain-text template with `{placeholders}`
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub vars: OrderMessageVars,
    #[serde(default)]
    pub include_qr: bool,
}

#[derive(Debug, Serialize)]
pub struct WhatsappLinkResponse {
    pub link: String,
    pub text: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

/// Build a wa.me link (and optional QR code) from a message template
pub async fn link(
    payload: std::result::Result<Json<WhatsappLinkRequest>, JsonRejection>,
) -> Result<Json<WhatsappLinkResponse>> {
    let Json(request) = payload?;
    let text = if !request.blocks.is_empty() {
        whatsapp::render_blocks(&request.blocks, &request.vars)
    } else {
        whatsapp::fill_template(request.template.as_deref().unwrap_or_default(), &request.vars)
    };

    let built = whatsapp::build_link(&request.phone, &text)?;
    let qr_code = if request.include_qr {
        Some(whatsapp::qr_png_data_uri(&built.link)?)
    } else {
        None
    };

    tracing::debug!(phone = %built.phone, qr = qr_code.is_some(), "WhatsApp link built");

    Ok(Json(WhatsappLinkResponse {
        link: built.link,
        text: built.text,
        phone: built.phone,
        qr_code,
    }))
}
