//! Plain-text rendering of console state.

use std::fmt::Write as _;

use leasedesk_core::{parse_timestamp, Inquiry, StatusFilter};

use super::ConsoleState;

/// Memo previews longer than this are truncated
pub const MEMO_PREVIEW_CHARS: usize = 30;

pub const EMPTY_MESSAGE: &str = "No inquiries yet. New submissions will appear here.";

const HEADERS: [&str; 10] = [
    "#", "Name", "Phone", "Car", "Type", "Months", "Business", "Status", "Date", "Memo",
];

pub fn title(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => "All inquiries".to_owned(),
        StatusFilter::Only(status) => format!("{} inquiries", status.label()),
    }
}

/// `YYYY-MM-DD HH:MM`, or the raw value when it can't be parsed.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_owned())
}

pub fn memo_preview(memo: Option<&str>) -> String {
    match memo.filter(|m| !m.is_empty()) {
        None => "-".to_owned(),
        Some(memo) if memo.chars().count() > MEMO_PREVIEW_CHARS => {
            let head: String = memo.chars().take(MEMO_PREVIEW_CHARS).collect();
            format!("{head}...")
        }
        Some(memo) => memo.to_owned(),
    }
}

fn car(inquiry: &Inquiry) -> &str {
    inquiry
        .car_name
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("-")
}

fn row(number: usize, inquiry: &Inquiry) -> [String; 10] {
    [
        number.to_string(),
        inquiry.name.clone(),
        inquiry.phone(),
        car(inquiry).to_owned(),
        inquiry.rent_type.clone(),
        inquiry.months.clone(),
        inquiry.business_type.clone(),
        inquiry.status.label().to_owned(),
        format_date(&inquiry.created_at),
        memo_preview(inquiry.memo.as_deref()),
    ]
}

/// `page / pages (total N)`, or `None` for an empty list.
pub fn pagination(state: &ConsoleState) -> Option<String> {
    (state.total() > 0).then(|| {
        format!(
            "{} / {} (total {})",
            state.page(),
            state.total_pages(),
            state.total()
        )
    })
}

/// Table of the current page with a title and pagination line.
pub fn list(state: &ConsoleState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "┌─ {} ({})", title(state.filter()), state.total());
    let _ = writeln!(out, "│");

    if state.total() == 0 {
        let _ = writeln!(out, "└─ {EMPTY_MESSAGE}");
        return out;
    }

    let rows: Vec<[String; 10]> = state
        .current_page()
        .iter()
        .enumerate()
        .map(|(offset, inquiry)| row(state.first_row_number() + offset, inquiry))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(out, "│  {}", line(&header));
    for cells in &rows {
        let _ = writeln!(out, "│  {}", line(cells));
    }
    if let Some(pages) = pagination(state) {
        let _ = writeln!(out, "│");
        let _ = writeln!(out, "└─ {pages}");
    }
    out
}

/// Read-only detail block for one record.
pub fn detail(inquiry: &Inquiry) -> String {
    let fields = [
        ("Name", inquiry.name.clone()),
        ("Phone", inquiry.phone()),
        ("Car", car(inquiry).to_owned()),
        ("Type", inquiry.rent_type.clone()),
        ("Months", inquiry.months.clone()),
        ("Business", inquiry.business_type.clone()),
        ("Status", inquiry.status.label().to_owned()),
        ("Received", format_date(&inquiry.created_at)),
        (
            "Memo",
            inquiry
                .memo
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "-".to_owned()),
        ),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "┌─ Inquiry #{}", inquiry.id);
    for (i, (label, value)) in fields.iter().enumerate() {
        let prefix = if i == fields.len() - 1 { "└─" } else { "├─" };
        let _ = writeln!(out, "{prefix} {label:<9} {value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::state::tests::inquiry;
    use leasedesk_core::InquiryStatus;

    #[test]
    fn dates_drop_seconds() {
        assert_eq!(format_date("2024-03-05 14:07:33"), "2024-03-05 14:07");
        assert_eq!(format_date("2024-03-05T14:07:33Z"), "2024-03-05 14:07");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn memo_preview_truncates_by_characters() {
        assert_eq!(memo_preview(None), "-");
        assert_eq!(memo_preview(Some("")), "-");
        assert_eq!(memo_preview(Some("short")), "short");

        let exact = "a".repeat(30);
        assert_eq!(memo_preview(Some(&exact)), exact);

        let long = "가".repeat(31);
        assert_eq!(memo_preview(Some(&long)), format!("{}...", "가".repeat(30)));
    }

    #[test]
    fn empty_list_shows_message_without_pagination() {
        let state = ConsoleState::default();
        let out = list(&state);
        assert!(out.contains(EMPTY_MESSAGE));
        assert!(pagination(&state).is_none());
    }

    #[test]
    fn list_numbers_rows_across_pages() {
        let mut state = ConsoleState::with_page_size(2);
        state.replace(StatusFilter::All, (1..=5).rev().map(inquiry).collect());
        state.next_page();

        let out = list(&state);
        assert!(out.contains("│  3  Customer 3"));
        assert!(out.contains("│  4  Customer 2"));
        assert!(out.contains("2 / 3 (total 5)"));
        assert!(out.contains("010-1234-5678"));
        assert!(out.contains("2024-03-05 14:07"));
    }

    #[test]
    fn titles_follow_filter() {
        assert_eq!(title(StatusFilter::All), "All inquiries");
        assert_eq!(
            title(StatusFilter::Only(InquiryStatus::Contacted)),
            "Contacted inquiries"
        );
    }

    #[test]
    fn detail_shows_every_field() {
        let mut record = inquiry(7);
        record.car_name = Some("Sonata".into());
        record.memo = Some("call back".into());
        record.status = InquiryStatus::Completed;

        let out = detail(&record);
        assert!(out.starts_with("┌─ Inquiry #7"));
        assert!(out.contains("Sonata"));
        assert!(out.contains("Completed"));
        assert!(out.contains("└─ Memo      call back"));
    }
}
