#![allow(dead_code)]

use chrono::NaiveDate;
use factura_pdf::{InvoiceData, LineItem, RenderConfig, UserInfo};

// ---- Fixtures ----

pub fn sample_invoice() -> InvoiceData {
    InvoiceData {
        invoice_number: "INV-1001".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        client_name: "Acme".to_string(),
        client_email: "billing@acme.test".to_string(),
        client_address: "1 Main St\nSpringfield".to_string(),
        items: vec![
            LineItem {
                description: "Design work".to_string(),
                quantity: 10,
                rate: 4000,
                amount: 40000,
            },
            LineItem {
                description: "Hosting".to_string(),
                quantity: 1,
                rate: 5000,
                amount: 5000,
            },
        ],
        subtotal: 45000,
        tax: Some(5000),
        total: 50000,
        notes: None,
        currency: "usd".to_string(),
        user_info: UserInfo {
            name: "Jo Freelancer".to_string(),
            company: Some("Jo Studio".to_string()),
            email: "jo@studio.test".to_string(),
        },
    }
}

/// `n` items named "Item 1".."Item n", each $10.00.
pub fn invoice_with_items(n: usize) -> InvoiceData {
    let mut invoice = sample_invoice();
    invoice.items = (1..=n)
        .map(|i| LineItem {
            description: format!("Item {i}"),
            quantity: 1,
            rate: 1000,
            amount: 1000,
        })
        .collect();
    invoice.subtotal = n as i64 * 1000;
    invoice.tax = Some(500);
    invoice.total = invoice.subtotal + 500;
    invoice
}

/// Shrunken geometry for exact pagination math: 400x200 page, 20pt margins,
/// 30pt banner, 20pt rows. Content bottom sits at y=180; a continuation page
/// holds exactly 8 rows.
pub fn tight_config() -> RenderConfig {
    RenderConfig {
        page_width: 400.0,
        page_height: 200.0,
        margin_top: 20.0,
        margin_bottom: 20.0,
        margin_left: 20.0,
        margin_right: 20.0,
        footer_margin: 12.0,
        banner_height: 30.0,
        row_height: 20.0,
        ..RenderConfig::default()
    }
}

// ---- PDF inspection ----

fn find(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > hay.len() {
        return None;
    }
    hay[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn parse_digits(bytes: &[u8]) -> Option<usize> {
    let end = bytes.iter().position(|b| !b.is_ascii_digit())?;
    std::str::from_utf8(&bytes[..end]).ok()?.parse().ok()
}

/// Per-page content streams, located by their `/Length` entries and inflated.
/// The engine's only streams are page contents.
pub fn content_streams(pdf: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut i = 0;
    while let Some(kw) = find(pdf, b"stream", i) {
        if kw >= 3 && &pdf[kw - 3..kw] == b"end" {
            i = kw + 6;
            continue;
        }
        let window_start = kw.saturating_sub(200);
        let dict = &pdf[window_start..kw];
        let len_pos = dict
            .windows(8)
            .rposition(|w| w == b"/Length ")
            .expect("stream dict has /Length");
        let len = parse_digits(&dict[len_pos + 8..]).expect("parse /Length");
        let mut data_start = kw + 6;
        if pdf.get(data_start) == Some(&b'\r') {
            data_start += 1;
        }
        if pdf.get(data_start) == Some(&b'\n') {
            data_start += 1;
        }
        let data = &pdf[data_start..data_start + len];
        out.push(
            miniz_oxide::inflate::decompress_to_vec_zlib(data).expect("inflate content stream"),
        );
        i = data_start + len;
    }
    out
}

/// Page count from the page tree's `/Count`.
pub fn page_count(pdf: &[u8]) -> usize {
    let pos = find(pdf, b"/Count ", 0).expect("page tree has /Count");
    parse_digits(&pdf[pos + 7..]).expect("parse /Count")
}

/// Pull shown strings and `re` rectangle operands out of one content stream.
/// Rectangles are `[x, y, w, h]` in PDF space (y up from the page bottom).
pub fn parse_content(content: &[u8]) -> (Vec<String>, Vec<[f32; 4]>) {
    let mut strings = Vec::new();
    let mut rects = Vec::new();
    let mut stack: Vec<f32> = Vec::new();
    let mut i = 0;
    while i < content.len() {
        match content[i] {
            b'(' => {
                let (s, next) = parse_literal_string(content, i + 1);
                strings.push(s);
                stack.clear();
                i = next;
            }
            b'<' if content.get(i + 1) != Some(&b'<') => {
                let (s, next) = parse_hex_string(content, i + 1);
                strings.push(s);
                stack.clear();
                i = next;
            }
            b'-' | b'.' | b'0'..=b'9' => {
                let start = i;
                i += 1;
                while i < content.len() && matches!(content[i], b'0'..=b'9' | b'.' | b'-') {
                    i += 1;
                }
                if let Ok(v) = std::str::from_utf8(&content[start..i]).unwrap().parse() {
                    stack.push(v);
                }
            }
            c if c.is_ascii_alphabetic() || c == b'\'' || c == b'"' => {
                let start = i;
                i += 1;
                while i < content.len() && (content[i].is_ascii_alphanumeric() || content[i] == b'*')
                {
                    i += 1;
                }
                if &content[start..i] == b"re" && stack.len() >= 4 {
                    let n = stack.len();
                    rects.push([stack[n - 4], stack[n - 3], stack[n - 2], stack[n - 1]]);
                }
                stack.clear();
            }
            b'/' => {
                i += 1;
                while i < content.len()
                    && !content[i].is_ascii_whitespace()
                    && content[i] != b'('
                    && content[i] != b'/'
                {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    (strings, rects)
}

fn parse_literal_string(content: &[u8], mut i: usize) -> (String, usize) {
    let mut s = String::new();
    while i < content.len() {
        match content[i] {
            b'\\' => {
                i += 1;
                match content.get(i).copied() {
                    Some(b'n') => {
                        s.push('\n');
                        i += 1;
                    }
                    Some(b'r') => {
                        s.push('\r');
                        i += 1;
                    }
                    Some(b't') => {
                        s.push('\t');
                        i += 1;
                    }
                    Some(d @ b'0'..=b'7') => {
                        let mut v = (d - b'0') as u32;
                        i += 1;
                        let mut k = 1;
                        while k < 3 && matches!(content.get(i), Some(b'0'..=b'7')) {
                            v = v * 8 + (content[i] - b'0') as u32;
                            i += 1;
                            k += 1;
                        }
                        if let Some(ch) = char::from_u32(v) {
                            s.push(ch);
                        }
                    }
                    Some(other) => {
                        s.push(other as char);
                        i += 1;
                    }
                    None => break,
                }
            }
            b')' => {
                i += 1;
                break;
            }
            b => {
                s.push(b as char);
                i += 1;
            }
        }
    }
    (s, i)
}

fn parse_hex_string(content: &[u8], mut i: usize) -> (String, usize) {
    let mut s = String::new();
    let mut hi: Option<u8> = None;
    while i < content.len() && content[i] != b'>' {
        if let Some(d) = (content[i] as char).to_digit(16) {
            match hi {
                None => hi = Some(d as u8),
                Some(h) => {
                    s.push(((h << 4) | d as u8) as char);
                    hi = None;
                }
            }
        }
        i += 1;
    }
    (s, i + 1)
}

/// Shown strings per page, in draw order.
pub fn page_strings(pdf: &[u8]) -> Vec<Vec<String>> {
    content_streams(pdf)
        .iter()
        .map(|c| parse_content(c).0)
        .collect()
}

/// Filled-rectangle operands per page.
pub fn page_rects(pdf: &[u8]) -> Vec<Vec<[f32; 4]>> {
    content_streams(pdf)
        .iter()
        .map(|c| parse_content(c).1)
        .collect()
}
