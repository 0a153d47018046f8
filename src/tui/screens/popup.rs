//! Popup screen: the modal edit form over a dimmed board.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use crate::form::Control;
use crate::model::{DeliveryStatus, Field};
use crate::popup::EditPopup;

/// The centered panel rect inside `area`.
///
/// The event loop uses the same computation to decide whether a mouse
/// click landed on the dimmed overlay outside the panel.
pub fn panel_area(area: Rect) -> Rect {
    let width = area.width.min(48);
    let height = area.height.min(14);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render(frame: &mut Frame, popup: &EditPopup) {
    let area = frame.area();

    // Dim the board behind the panel.
    frame
        .buffer_mut()
        .set_style(area, Style::default().add_modifier(Modifier::DIM));

    let panel = panel_area(area);
    frame.render_widget(Clear, panel);

    let block = Block::bordered()
        .title(" Edit delivery ")
        .padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let form = popup.form();
    let muted = Style::default().fg(Color::DarkGray);
    let error_style = Style::default().fg(Color::Red);
    let focused_value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::Gray);

    let mut lines = Vec::new();

    // One input row plus an error slot per text field.
    for field in [Field::Name, Field::Address, Field::Distance] {
        let focused = form.focus() == Control::Field(field);
        let mut spans = vec![
            Span::styled(format!("{:<10}", field.label()), muted),
            Span::styled(
                form.value(field).to_string(),
                if focused { focused_value } else { value_style },
            ),
        ];
        if focused {
            spans.push(Span::styled("█", muted));
        }
        lines.push(Line::from(spans));

        lines.push(match form.error(field) {
            Some(message) => Line::from(Span::styled(format!("          {message}"), error_style)),
            None => Line::from(""),
        });
    }

    // Status selector, painted with the capability's localized labels.
    let status = DeliveryStatus::parse(form.value(Field::Status)).unwrap_or_default();
    let status_focused = form.focus() == Control::Field(Field::Status);
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", Field::Status.label()), muted),
        Span::styled(
            format!("‹ {} ›", popup.labels().label(status)),
            if status_focused { focused_value } else { value_style },
        ),
    ]));
    lines.push(Line::from(""));

    // Save control: dimmed while validation is failing.
    let save_style = if !form.submit_enabled() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else if form.focus() == Control::Submit {
        focused_value
    } else {
        value_style
    };
    lines.push(Line::from(Span::styled("[ Save ]", save_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "tab next  ←→ status  ⏎ save  esc cancel",
        muted,
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::layout::Position;

    #[test]
    fn panel_is_centered_and_clamped() {
        let panel = panel_area(Rect::new(0, 0, 100, 40));
        assert_eq!(panel, Rect::new(26, 13, 48, 14));

        // Never larger than the terminal.
        let tiny = panel_area(Rect::new(0, 0, 20, 6));
        assert_eq!(tiny, Rect::new(0, 0, 20, 6));
    }

    #[test]
    fn clicks_outside_the_panel_are_overlay_clicks() {
        let area = Rect::new(0, 0, 100, 40);
        let panel = panel_area(area);

        assert!(panel.contains(Position::new(30, 15)));
        assert!(!panel.contains(Position::new(2, 2)));
    }
}
