//! The profile card drawn over the mosaic.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap},
};
use tessella_content::{CommissionStatus, PortfolioContent};

/// Widest the card gets, borders included.
const MAX_WIDTH: u16 = 64;

/// Tallest the card gets, borders included.
const MAX_HEIGHT: u16 = 32;

/// Accent used for headings and borders.
const ACCENT: Color = Color::Rgb(255, 209, 102);

/// Badge color for a commission status.
pub fn status_color(status: CommissionStatus) -> Color {
    match status {
        CommissionStatus::Open => Color::Green,
        CommissionStatus::Waitlist => Color::Yellow,
        CommissionStatus::Closed => Color::Red,
        CommissionStatus::Unknown => Color::Gray,
    }
}

/// Area of the card, centered in `area` and leaving room for the help line.
pub fn card_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(MAX_WIDTH);
    let height = area.height.saturating_sub(3).min(MAX_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height.saturating_sub(1) - height) / 2,
        width,
        height,
    }
}

/// Text of the card.
pub fn card_lines(content: &PortfolioContent) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(content.artist_name.as_str().bold().fg(ACCENT)).centered(),
        Line::from(content.artist_tagline.as_str().italic().dark_gray()).centered(),
        Line::default(),
        Line::from(content.about_paragraph1.as_str()),
        Line::default(),
        Line::from(content.about_paragraph2.as_str()),
        Line::default(),
        Line::from(vec![
            "Commissions ".bold(),
            Span::styled(
                format!(" {} ", content.commission_status),
                Style::new()
                    .fg(Color::Black)
                    .bg(status_color(content.commission_status))
                    .add_modifier(Modifier::BOLD),
            ),
            " ".into(),
            content.commission_message.as_str().into(),
        ]),
        Line::default(),
        Line::from("Gallery".bold().fg(ACCENT)),
    ];

    lines.extend(content.gallery_items.iter().map(|item| {
        Line::from(vec![
            "  • ".dark_gray(),
            item.title.as_str().into(),
            format!("  {}", item.category).dark_gray(),
        ])
    }));

    if !content.social_links.is_empty() {
        lines.push(Line::default());
        let mut spans: Vec<Span> = Vec::with_capacity(content.social_links.len() * 2);
        for (i, link) in content.social_links.iter().enumerate() {
            if i > 0 {
                spans.push("  ".into());
            }
            spans.push(format!("{} {}", link.icon, link.text).into());
        }
        lines.push(Line::from(spans).centered());
    }

    lines
}

/// Draw the card over whatever is already in the frame.
pub fn render(frame: &mut Frame, area: Rect, content: &PortfolioContent) {
    let area = card_area(area);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(ACCENT))
        .padding(Padding::horizontal(1))
        .style(Style::new().bg(Color::Rgb(10, 10, 20)));

    let card = Paragraph::new(card_lines(content))
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(card, area);
}
