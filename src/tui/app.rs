//! Application loop and input routing.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::{Position, Rect};

use crate::app::DeliveryBoard;

use super::screens::{self, BoardScreen};

/// Runs the TUI event loop until the user quits.
pub fn run(board: &mut DeliveryBoard) -> io::Result<()> {
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = event_loop(&mut terminal, board);
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, board: &mut DeliveryBoard) -> io::Result<()> {
    let mut screen = BoardScreen::new();

    loop {
        board.poll_pending();

        terminal.draw(|frame| {
            screen.render(frame, board);
            if let Some(popup) = board.popup().filter(|p| p.is_open()) {
                screens::popup::render(frame, popup);
            }
        })?;

        // Poll with a timeout so pending capability loads resolve promptly
        // even while the user types nothing.
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if board.popup().is_some() {
                    on_popup_key(board, key.code);
                } else if on_board_key(board, &mut screen, key.code) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                // A click on the dimmed overlay outside the panel closes
                // the popup, same path as Esc and a committed submit.
                if board.popup().is_some() {
                    let size = terminal.size()?;
                    let panel =
                        screens::popup::panel_area(Rect::new(0, 0, size.width, size.height));
                    if !panel.contains(Position::new(mouse.column, mouse.row)) {
                        board.close_popup();
                    }
                }
            }
            _ => {}
        }
    }
}

/// Board keys. Returns `true` when the user quits.
fn on_board_key(board: &mut DeliveryBoard, screen: &mut BoardScreen, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => screen.move_up(),
        KeyCode::Down | KeyCode::Char('j') => screen.move_down(board.cards().len()),
        KeyCode::Enter | KeyCode::Char('e') => board.request_edit(screen.selected()),
        KeyCode::Char('t') => board.calculate(),
        KeyCode::Char('r') => board.reset_result(),
        _ => {}
    }
    false
}

fn on_popup_key(board: &mut DeliveryBoard, code: KeyCode) {
    match code {
        KeyCode::Esc => board.close_popup(),
        KeyCode::Enter => {
            // The board closes the popup on a committed submit.
            board.submit_popup();
        }
        _ => {
            let Some(popup) = board.popup_mut() else {
                return;
            };
            let form = popup.form_mut();
            match code {
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                KeyCode::Left => form.cycle_status(false),
                KeyCode::Right => form.cycle_status(true),
                KeyCode::Backspace => form.on_backspace(),
                KeyCode::Char(c) => form.on_char(c),
                _ => {}
            }
        }
    }
}
