//! Caller-location resolution
//!
//! Maps a frame depth to the source location of a log call. The resolver is
//! a boundary trait so the stack-walking mechanism can be replaced (or
//! stubbed in tests); the default implementation walks the live stack with
//! the `backtrace` crate.
//!
//! `skip` counts wrapping functions from the logging-core boundary: the
//! walk first locates the resolver's own frame, skips `skip` frames past
//! it, and symbolizes the next one. Counting from the resolver's frame
//! rather than from the top of the walk keeps the contract independent of
//! how many internal frames the unwinder itself contributes.

use std::fmt;

/// Resolved source location of one log call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerSite {
    pub file: String,
    pub function: String,
    pub line: u32,
}

impl fmt::Display for CallerSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)
    }
}

/// Boundary for stack introspection. Best-effort: a depth past the end of
/// the stack, or a frame without debug info, yields `None` rather than an
/// error.
pub trait ResolveCaller: Send + Sync {
    fn resolve(&self, skip: usize) -> Option<CallerSite>;
}

/// Default resolver backed by a live stack walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktraceResolver;

impl ResolveCaller for BacktraceResolver {
    // This frame is the anchor the skip contract counts from; it must stay
    // a real frame even under static dispatch.
    #[inline(never)]
    fn resolve(&self, skip: usize) -> Option<CallerSite> {
        let mut anchored = false;
        let mut remaining = skip;
        let mut site: Option<CallerSite> = None;

        backtrace::trace(|frame| {
            if !anchored {
                backtrace::resolve_frame(frame, |symbol| {
                    if anchored {
                        return;
                    }
                    if let Some(name) = symbol.name() {
                        let name = name.to_string();
                        if name.contains("BacktraceResolver") && name.contains("resolve") {
                            anchored = true;
                        }
                    }
                });
                return true;
            }

            if remaining > 0 {
                remaining -= 1;
                return true;
            }

            backtrace::resolve_frame(frame, |symbol| {
                if site.is_some() {
                    return;
                }
                let function = match symbol.name() {
                    Some(name) => strip_hash(&name.to_string()),
                    None => return,
                };
                let file = symbol
                    .filename()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let line = symbol.lineno().unwrap_or(0);
                site = Some(CallerSite {
                    file,
                    function,
                    line,
                });
            });
            false
        });

        site
    }
}

/// Drop the trailing `::h<hex>` disambiguator from a demangled symbol.
fn strip_hash(name: &str) -> String {
    match name.rfind("::h") {
        Some(pos) if name[pos + 3..].chars().all(|c| c.is_ascii_hexdigit()) => {
            name[..pos].to_string()
        }
        _ => name.to_string(),
    }
}
