//! Board screen: delivery cards, controls panel, and the loading line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Padding, Paragraph};

use crate::app::DeliveryBoard;
use crate::card::CardView;

pub struct BoardScreen {
    selected: usize,
}

impl BoardScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn render(&self, frame: &mut Frame, board: &DeliveryBoard) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // title
            Constraint::Min(0),    // cards
            Constraint::Length(2), // controls panel
            Constraint::Length(1), // help
        ])
        .split(area);

        // Title.
        let title = Paragraph::new(Line::from(vec![Span::styled(
            "Courier",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(title, chunks[0]);

        let muted = Style::default().fg(Color::DarkGray);

        // Cards are painted from the retained views, never from the records.
        let items: Vec<ListItem> = board
            .cards()
            .iter()
            .enumerate()
            .map(|(i, card)| card_item(&card.borrow(), i == self.selected))
            .collect();
        let list = List::new(items).block(Block::default().padding(Padding::new(2, 2, 0, 0)));
        frame.render_widget(list, chunks[1]);

        // Controls panel: loading line, then the result slot.
        let loading = if board.is_loading() {
            Span::styled(" Loading editor…", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("")
        };
        let result = match board.controls().result() {
            Some(text) => Span::styled(
                format!(" {text}"),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(" t to total distances", muted),
        };
        let controls = Paragraph::new(vec![Line::from(loading), Line::from(result)])
            .block(Block::default().padding(Padding::new(1, 0, 0, 0)));
        frame.render_widget(controls, chunks[2]);

        // Help line.
        let help = Paragraph::new(Line::from(vec![Span::styled(
            " ↑↓ navigate  ⏎ edit  t total  r reset  q quit",
            muted,
        )]));
        frame.render_widget(help, chunks[3]);
    }
}

/// One card as a list item: header line with the name, then the remaining
/// label/value lines, styled by the card's derived state.
fn card_item(card: &CardView, selected: bool) -> ListItem<'static> {
    let style = card.style();
    let value_style = if style.canceled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if style.delivered {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    let header_style = if selected {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        value_style
    };
    let muted = Style::default().fg(Color::DarkGray);
    let pointer = if selected { "› " } else { "  " };

    let mut lines = Vec::new();
    for line in card.lines() {
        if lines.is_empty() {
            let mut spans = vec![
                Span::styled(pointer.to_string(), header_style),
                Span::styled(line.value().to_string(), header_style),
            ];
            if style.canceled {
                spans.push(Span::styled("  [canceled]", muted));
            } else if style.delivered {
                spans.push(Span::styled("  [delivered]", muted));
            }
            if selected && card.has_edit_control() {
                spans.push(Span::styled("  ⏎ edit", muted));
            }
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!("    {:<10}", line.label()), muted),
                Span::styled(line.value().to_string(), value_style),
            ]));
        }
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}
