//! Document templates
//!
//! One renderer covers all four documents; the kind switches sections
//! in and out. Estimate and invoice carry the material table; receipts
//! and reports carry the payment schedule; invoices and receipts add
//! bank instructions and the UPI QR when available.

use crate::data::{format_money, format_money_int, DocumentData, DocumentKind};
use crate::error::DocumentError;
use crate::layout::{PageComposer, MARGIN_MM, PAGE_WIDTH_MM};
use crate::qr::upi_qr_image;

const QR_SIZE_MM: f32 = 30.0;
const LOGO_WIDTH_MM: f32 = 28.0;

/// Render a complete document to PDF bytes. Any failure aborts the
/// whole document; no partial output is returned.
pub fn render(data: &DocumentData) -> Result<Vec<u8>, DocumentError> {
    let title = format!("{} - {}", data.kind.title(), data.client.name);
    let mut page = PageComposer::new(&title)?;

    draw_header(&mut page, data)?;
    draw_party_block(&mut page, data);

    match data.kind {
        DocumentKind::Estimate | DocumentKind::Invoice => {
            draw_material_table(&mut page, data);
            draw_totals(&mut page, data);
        }
        DocumentKind::Receipt { .. } | DocumentKind::PaymentReport => {
            draw_payment_table(&mut page, data);
        }
    }

    if !matches!(data.kind, DocumentKind::Estimate) {
        draw_payment_summary(&mut page, data);
    }

    if matches!(data.kind, DocumentKind::Invoice | DocumentKind::Receipt { .. }) {
        draw_bank_block(&mut page, data)?;
    }

    draw_notes(&mut page, data);
    draw_footer(&mut page, data);

    if data.kind.stamped_paid() {
        page.watermark("PAID");
    }

    page.finish()
}

fn draw_header(page: &mut PageComposer, data: &DocumentData) -> Result<(), DocumentError> {
    // Logo sits at fixed coordinates in the top-right corner
    if let Some(png) = &data.company.logo_png {
        let logo = image::load_from_memory(png).map_err(|e| DocumentError::Image(e.to_string()))?;
        page.embed_image(&logo, PAGE_WIDTH_MM - MARGIN_MM - LOGO_WIDTH_MM, page.cursor(), LOGO_WIDTH_MM);
    }

    page.text_bold(&data.company.name, 16.0, MARGIN_MM, page.cursor() - 4.0);
    page.text(&data.company.address, 9.0, MARGIN_MM, page.cursor() - 10.0);
    page.text(
        &format!("{}  |  {}", data.company.phone, data.company.email),
        9.0,
        MARGIN_MM,
        page.cursor() - 15.0,
    );
    page.advance(22.0);

    page.heading(data.kind.title(), 15.0);
    page.text_right(
        &format!("Date: {}", data.date.format("%d-%m-%Y")),
        9.0,
        PAGE_WIDTH_MM - MARGIN_MM,
        page.cursor(),
        false,
    );
    page.advance(8.0);
    page.hline(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, page.cursor());
    page.advance(6.0);

    Ok(())
}

fn draw_party_block(page: &mut PageComposer, data: &DocumentData) {
    page.field_line("Client", &data.client.name);
    page.field_line("Phone", &data.client.phone);
    if let Some(address) = &data.client.address {
        page.field_line("Address", address);
    }
    if let Some(city) = &data.client.city {
        page.field_line("City", city);
    }
    page.advance(4.0);
}

fn draw_material_table(page: &mut PageComposer, data: &DocumentData) {
    let rows: Vec<Vec<String>> = data
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            vec![
                format!("{}", i + 1),
                line.name.clone(),
                line.measure.clone(),
                format_money(line.unit_price),
                format_money(line.total),
            ]
        })
        .collect();

    page.table(
        &["#", "Material", "Measure", "Rate", "Amount"],
        &[0.06, 0.40, 0.22, 0.16, 0.16],
        &[false, false, false, true, true],
        &rows,
    );
    page.advance(4.0);
}

fn draw_totals(page: &mut PageComposer, data: &DocumentData) {
    page.ensure_space(24.0);
    let right = PAGE_WIDTH_MM - MARGIN_MM;

    page.text_right(
        &format!("Subtotal: {}", format_money(data.totals.subtotal)),
        10.0,
        right,
        page.cursor(),
        false,
    );
    page.advance(6.0);

    if data.totals.discount > 0.0 {
        page.text_right(
            &format!("Discount: {}", format_money(data.totals.discount)),
            10.0,
            right,
            page.cursor(),
            false,
        );
        page.advance(6.0);
    }

    page.text_right(
        &format!("Grand Total: {}", format_money_int(data.totals.grand_total)),
        12.0,
        right,
        page.cursor(),
        true,
    );
    page.advance(10.0);
}

fn draw_payment_table(page: &mut PageComposer, data: &DocumentData) {
    let rows: Vec<Vec<String>> = data
        .payments
        .iter()
        .map(|payment| {
            vec![
                format!("Phase {}", payment.phase),
                format_money_int(payment.amount),
                payment.status.clone(),
                payment
                    .paid_on
                    .map(|d| d.format("%d-%m-%Y").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    page.table(
        &["Phase", "Amount", "Status", "Paid on"],
        &[0.25, 0.30, 0.22, 0.23],
        &[false, true, false, false],
        &rows,
    );
    page.advance(4.0);
}

fn draw_payment_summary(page: &mut PageComposer, data: &DocumentData) {
    page.ensure_space(22.0);
    let right = PAGE_WIDTH_MM - MARGIN_MM;

    page.text_right(
        &format!("Project Total: {}", format_money_int(data.totals.grand_total)),
        10.0,
        right,
        page.cursor(),
        false,
    );
    page.advance(6.0);
    page.text_right(
        &format!("Amount Received: {}", format_money_int(data.amount_received)),
        10.0,
        right,
        page.cursor(),
        false,
    );
    page.advance(6.0);
    page.text_right(
        &format!("Balance: {}", format_money_int(data.balance)),
        11.0,
        right,
        page.cursor(),
        true,
    );
    page.advance(10.0);
}

fn draw_bank_block(page: &mut PageComposer, data: &DocumentData) -> Result<(), DocumentError> {
    let Some(bank) = &data.bank else {
        return Ok(());
    };

    page.ensure_space(QR_SIZE_MM + 16.0);
    page.text_bold("Payment Details", 11.0, MARGIN_MM, page.cursor());
    page.advance(7.0);

    page.field_line("Bank", &bank.bank_name);
    page.field_line("Account", &bank.account_name);
    page.field_line("Account No.", &bank.account_number);
    page.field_line("IFSC", &bank.ifsc);

    // The QR block is simply omitted when no UPI id is configured.
    if let Some(upi_id) = &bank.upi_id {
        let amount = if data.balance > 0 {
            data.balance
        } else {
            data.totals.grand_total
        };
        let qr = upi_qr_image(upi_id, &data.company.name, amount)?;
        page.embed_image(
            &qr,
            PAGE_WIDTH_MM - MARGIN_MM - QR_SIZE_MM,
            page.cursor() + QR_SIZE_MM - 4.0,
            QR_SIZE_MM,
        );
        page.field_line("UPI", upi_id);
    }

    page.advance(6.0);
    Ok(())
}

fn draw_notes(page: &mut PageComposer, data: &DocumentData) {
    if data.notes.is_empty() {
        return;
    }

    page.ensure_space(8.0 + data.notes.len() as f32 * 5.0);
    page.text_bold("Notes", 10.0, MARGIN_MM, page.cursor());
    page.advance(6.0);
    for note in &data.notes {
        page.ensure_space(5.0);
        page.text(&format!("- {}", note), 9.0, MARGIN_MM, page.cursor());
        page.advance(5.0);
    }
    page.advance(4.0);
}

fn draw_footer(page: &mut PageComposer, data: &DocumentData) {
    page.ensure_space(12.0);
    page.hline(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, page.cursor());
    page.text(
        &format!("Thank you for choosing {}.", data.company.name),
        8.5,
        MARGIN_MM,
        page.cursor() - 5.0,
    );
    page.advance(10.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BankInfo, CompanyInfo, LineRow, PartyInfo, PaymentRowData, TotalsBlock};
    use chrono::NaiveDate;

    fn sample_data(kind: DocumentKind) -> DocumentData {
        DocumentData {
            kind,
            company: CompanyInfo {
                name: "Sitedesk Interiors".into(),
                address: "14 Lake Road, Pune".into(),
                phone: "020-1234567".into(),
                email: "office@sitedesk.example".into(),
                logo_png: None,
            },
            client: PartyInfo {
                name: "Asha Varma".into(),
                phone: "9876543210".into(),
                address: Some("2 Hill View".into()),
                city: Some("Pune".into()),
            },
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            lines: vec![
                LineRow {
                    name: "Wardrobe shutter".into(),
                    measure: "210 x 45 cm".into(),
                    unit_price: 1_450.0,
                    total: 15_000.0,
                },
                LineRow {
                    name: "Handles".into(),
                    measure: "8 pcs".into(),
                    unit_price: 350.0,
                    total: 2_800.0,
                },
            ],
            totals: TotalsBlock {
                subtotal: 17_800.0,
                discount: 800.0,
                grand_total: 17_000,
            },
            payments: vec![PaymentRowData {
                phase: 1,
                amount: 8_500,
                status: "paid".into(),
                paid_on: NaiveDate::from_ymd_opt(2024, 3, 20),
            }],
            amount_received: 8_500,
            balance: 8_500,
            bank: Some(BankInfo {
                bank_name: "State Bank".into(),
                account_name: "Sitedesk Interiors".into(),
                account_number: "00123456789".into(),
                ifsc: "SBIN0001234".into(),
                upi_id: Some("sitedesk@upi".into()),
            }),
            notes: vec!["50% advance before work starts.".into()],
        }
    }

    #[test]
    fn test_estimate_renders() {
        let bytes = render(&sample_data(DocumentKind::Estimate)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_invoice_renders() {
        let bytes = render(&sample_data(DocumentKind::Invoice)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_receipt_renders_with_watermark() {
        let bytes = render(&sample_data(DocumentKind::Receipt { phase: 1 })).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_upi_id_omits_qr_but_succeeds() {
        let mut data = sample_data(DocumentKind::Invoice);
        data.bank.as_mut().unwrap().upi_id = None;
        let bytes = render(&data).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_material_list_paginates() {
        let mut data = sample_data(DocumentKind::Estimate);
        data.lines = (0..80)
            .map(|i| LineRow {
                name: format!("Material {}", i),
                measure: "100 x 50 cm".into(),
                unit_price: 100.0,
                total: 538.2,
            })
            .collect();
        let bytes = render(&data).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
