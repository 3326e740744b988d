//! Which of the configured applications are actually installed.

mod probe;

pub use probe::SystemProbe;

/// Answers whether an application is installed in the current environment.
pub trait AppProbe {
    /// `true` when `name` can be launched.
    fn exists(&self, name: &str) -> bool;
}

impl<F> AppProbe for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, name: &str) -> bool {
        self(name)
    }
}

/// Installed subset of `candidates`, in configured order.
///
/// Blank names are never available and `exists` is not consulted for them.
pub fn available<S: AsRef<str>>(candidates: &[S], exists: &dyn AppProbe) -> Vec<String> {
    candidates
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|name| !name.trim().is_empty() && exists.exists(name))
        .map(String::from)
        .collect()
}
