mod common;

use factura_pdf::{render_invoice, RenderConfig};

#[test]
fn zero_items_renders_header_row_on_a_single_page() {
    let invoice = common::invoice_with_items(0);
    let pdf = render_invoice(&invoice, &RenderConfig::default()).unwrap();

    assert_eq!(common::page_count(&pdf), 1);
    assert_eq!(common::content_streams(&pdf).len(), 1);

    let strings = &common::page_strings(&pdf)[0];
    assert!(strings.iter().any(|s| s == "Description"));
    assert!(strings.iter().any(|s| s == "Amount"));
    assert!(!strings.iter().any(|s| s.starts_with("Item ")));
}

// With tight_config, page 1 holds one row: the banner (30pt) plus its 18pt
// gap puts the cursor at 48, the parties block (5 lines of 14pt + 18pt gap)
// at 136, and the 20pt header row at 156, leaving 24pt above the content
// bottom at 180. Continuation pages hold 8 rows each, so 17 items lay out
// 1 + 8 + 8 and the totals block lands on a fourth page.
#[test]
fn long_table_spans_expected_pages_with_footer_on_each() {
    let invoice = common::invoice_with_items(17);
    let cfg = common::tight_config();
    let pdf = render_invoice(&invoice, &cfg).unwrap();

    assert_eq!(common::page_count(&pdf), 4);

    let pages = common::page_strings(&pdf);
    assert_eq!(pages.len(), 4);
    for (i, strings) in pages.iter().enumerate() {
        assert!(
            strings.iter().any(|s| s == &cfg.footer_caption),
            "footer caption missing on page {}",
            i + 1
        );
    }

    // Rows are never split: each item shows up exactly once, in order.
    let has = |page: usize, item: &str| pages[page].iter().any(|s| s == item);
    assert!(has(0, "Item 1"));
    assert!(!has(0, "Item 2"));
    assert!(has(1, "Item 2") && has(1, "Item 9"));
    assert!(!has(1, "Item 10"));
    assert!(has(2, "Item 10") && has(2, "Item 17"));
}

#[test]
fn totals_break_to_a_fresh_page_when_the_table_fills_the_margin() {
    // 17 items leave the cursor exactly at the content bottom, so a totals
    // block drawn in place would cross the margin.
    let invoice = common::invoice_with_items(17);
    let pdf = render_invoice(&invoice, &common::tight_config()).unwrap();

    let pages = common::page_strings(&pdf);
    assert!(!pages[2].iter().any(|s| s == "Total"));
    assert!(pages[3].iter().any(|s| s == "Subtotal"));
    assert!(pages[3].iter().any(|s| s == "Total"));
}

#[test]
fn row_shading_parity_is_global_across_page_breaks() {
    let invoice = common::invoice_with_items(17);
    let pdf = render_invoice(&invoice, &common::tight_config()).unwrap();

    // Page 2 carries items with ordinal indices 1..=8 at cursors 20..=160.
    // Shaded rows are the even indices (2, 4, 6, 8) at cursors 40/80/120/160,
    // i.e. PDF-space y = 200 - cursor - 20 → {140, 100, 60, 20}. A parity
    // reset at the page break would shade cursors 20/60/100/140 instead,
    // giving {160, 120, 80, 40}.
    let rects = &common::page_rects(&pdf)[1];
    assert_eq!(rects.len(), 4, "page 2 should hold exactly 4 shading rects");

    let mut ys: Vec<f32> = rects.iter().map(|r| r[1]).collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
    for (got, want) in ys.iter().zip([20.0, 60.0, 100.0, 140.0]) {
        assert!(
            (got - want).abs() < 0.5,
            "shading rect at y={got}, expected {want}"
        );
    }
}
