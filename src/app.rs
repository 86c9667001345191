use std::time::Duration;

use anyhow::Result;
use ratatui::{backend::Backend, Terminal};
use zygote_config::defaults::EVENT_POLL_INTERVAL_MS;

use crate::editor::Editor;
use crate::event::{Event, EventHandler};
use crate::ui;

/// Main application loop around an [`Editor`]
pub struct App {
    editor: Editor,
    event_handler: EventHandler,
    needs_redraw: bool,
}

impl App {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            event_handler: EventHandler::new(Duration::from_millis(EVENT_POLL_INTERVAL_MS)),
            needs_redraw: true,
        }
    }

    /// Run until the editor asks to quit
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.editor.should_quit() {
            // Render only after something changed
            if self.needs_redraw {
                terminal.draw(|frame| ui::draw(frame, &mut self.editor))?;
                self.needs_redraw = false;
            }

            match self.event_handler.next()? {
                Event::Key(key) => {
                    if let Some(name) = zygote_keyboard::key_string(key) {
                        self.editor.handle_key(&name);
                        self.needs_redraw = true;
                    }
                }
                Event::Resize(_, _) => self.needs_redraw = true,
                Event::Tick => {}
            }
        }

        zygote_logger::info("Zygote stopped");
        Ok(())
    }
}
