//! WhatsApp deep links for order follow-up messages.
//!
//! Message templates come from the CMS as rich-text blocks with `{name}`
//! style placeholders. They are rendered to WhatsApp markdown, encoded into
//! a `wa.me` link, and optionally turned into a QR code for printed
//! confirmations.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use serde::{Deserialize, Serialize};

/// Smallest QR image edge in pixels
const QR_MIN_DIMENSION: u32 = 256;

#[derive(Debug, thiserror::Error)]
pub enum WhatsappError {
    #[error("Contact phone number has no digits")]
    MissingPhone,

    #[error("QR code generation failed: {0}")]
    QrCode(String),
}

impl WhatsappError {
    pub fn error_type(&self) -> &'static str {
        match self {
            WhatsappError::MissingPhone => "missing_phone",
            WhatsappError::QrCode(_) => "qr_code",
        }
    }
}

/// Values available to message templates
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMessageVars {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub order_number: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
}

impl OrderMessageVars {
    /// Look up a placeholder by its template name
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "phone" => &self.phone,
            "service" => &self.service,
            "date" => &self.date,
            "time" => &self.time,
            "pickup" => &self.pickup,
            "dropoff" => &self.dropoff,
            "orderNumber" => &self.order_number,
            "amount" => &self.amount,
            "currency" => return Some(self.currency.as_deref().unwrap_or("EUR")),
            _ => return None,
        };
        value.as_deref()
    }
}

/// A rich-text block as stored by the CMS
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBlock {
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<MessageSpan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageSpan {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

/// Generated link, message text and normalized phone
#[derive(Debug, Clone, Serialize)]
pub struct WhatsappLink {
    pub link: String,
    pub text: String,
    pub phone: String,
}

/// Strip everything but digits from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Replace `{key}` placeholders. Unknown or empty keys render as nothing;
/// braces that do not wrap a plain word are kept as written.
pub fn fill_template(text: &str, vars: &OrderMessageVars) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_placeholder_name(&after[..close]) => {
                out.push_str(vars.get(&after[..close]).unwrap_or_default());
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render CMS blocks to WhatsApp markdown, one line per block.
pub fn render_blocks(blocks: &[MessageBlock], vars: &OrderMessageVars) -> String {
    blocks
        .iter()
        .filter(|block| block.kind == "block")
        .map(|block| {
            block
                .children
                .iter()
                .map(|span| {
                    let mut text = fill_template(&span.text, vars);
                    let has = |mark: &str| span.marks.iter().any(|m| m == mark);
                    if has("strong") {
                        text = format!("*{}*", text);
                    }
                    if has("em") {
                        text = format!("_{}_", text);
                    }
                    if has("code") {
                        text = format!("\n{}\n", text);
                    }
                    text
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a `wa.me` link that opens a chat with `text` prefilled.
pub fn build_link(phone: &str, text: &str) -> Result<WhatsappLink, WhatsappError> {
    let phone = normalize_phone(phone);
    if phone.is_empty() {
        return Err(WhatsappError::MissingPhone);
    }

    // form encoding uses '+' for spaces; a literal '+' is already %2B
    let encoded: String = url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20");

    Ok(WhatsappLink {
        link: format!("https://wa.me/{}?text={}", phone, encoded),
        text: text.to_string(),
        phone,
    })
}

/// Encode `link` as a PNG QR code data URI.
pub fn qr_png_data_uri(link: &str) -> Result<String, WhatsappError> {
    let code = QrCode::new(link.as_bytes()).map_err(|e| WhatsappError::QrCode(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
        .build();

    let mut png = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| WhatsappError::QrCode(e.to_string()))?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
