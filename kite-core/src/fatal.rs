//! Fatal-path reporting for internal invariant violations.
//!
//! Selector internals assert with plain panics. [`install_panic_hook`]
//! makes those reports actionable: before the default handler runs, the
//! process id and a captured call stack are written to the log, so a
//! failed invariant can be traced after the fact.

use std::{backtrace::Backtrace, panic, process, sync::Once};

static INSTALL: Once = Once::new();

/// Install a process-wide panic hook that logs the panic message, the
/// process id and a call stack before handing off to the previous hook.
/// Installing more than once is a no-op.
pub fn install_panic_hook() {
  INSTALL.call_once(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
      let message = info
        .payload()
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
        .unwrap_or("panic");
      tracing::error!(
        "assert failed: '{message}'\npid: {}\ncallstack:\n{}",
        process::id(),
        Backtrace::force_capture()
      );
      previous(info);
    }));
  });
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_hook_installs_once_and_preserves_unwinding() {
    install_panic_hook();
    install_panic_hook();

    let result = panic::catch_unwind(|| panic!("invariant violated"));
    assert!(result.is_err());
  }
}
