use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static TERMINAL_INITIALIZED: AtomicBool = AtomicBool::new(false);

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

/// RAII wrapper for raw mode and alternate screen.
///
/// Entering switches the terminal to raw mode on the alternate screen;
/// dropping restores it, and a panic hook restores it before the panic
/// message is printed.
pub struct RawMode {
    original_hook: Option<PanicHook>,
}

impl RawMode {
    /// Enter raw mode and the alternate screen.
    pub fn enter() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        crossterm::execute!(
            io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )?;

        TERMINAL_INITIALIZED.store(true, Ordering::SeqCst);

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|info| {
            restore_terminal();
            eprintln!("{}", info);
        }));

        tracing::debug!("Entered raw mode");
        Ok(Self {
            original_hook: Some(original_hook),
        })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        restore_terminal();

        if let Some(hook) = self.original_hook.take() {
            std::panic::set_hook(hook);
        }
    }
}

/// Leaves the alternate screen and raw mode, once.
fn restore_terminal() {
    if TERMINAL_INITIALIZED.swap(false, Ordering::SeqCst) {
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Raw mode itself needs a real TTY; only the idle paths are testable.
    #[test]
    fn test_restore_without_init_is_noop() {
        restore_terminal();
        assert!(!TERMINAL_INITIALIZED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_drop_without_hook() {
        let raw = RawMode {
            original_hook: None,
        };
        drop(raw);
        assert!(!TERMINAL_INITIALIZED.load(Ordering::SeqCst));
    }
}
