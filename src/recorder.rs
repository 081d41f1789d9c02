//! Transparent timing wrapper around workload functions.
//!
//! [`Recorder::wrap`] turns a workload into a [`Timed`] value with the same
//! inputs and outputs. Each successful call appends exactly one [`Sample`] to
//! the recorder's [`SampleStore`]; a call that returns `Err` or panics
//! appends nothing.
//!
//! The first argument must implement [`InputLen`]. A workload whose primary
//! input has no length does not type-check, so there is no runtime path that
//! records a sample with a made-up size.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::harness::measure_once;
use crate::schema::Sample;
use crate::store::SampleStore;

/// Length of a workload's primary input.
pub trait InputLen {
    fn input_len(&self) -> usize;
}

impl<T> InputLen for [T] {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> InputLen for [T; N] {
    fn input_len(&self) -> usize {
        N
    }
}

impl<T> InputLen for Vec<T> {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl<T> InputLen for VecDeque<T> {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl InputLen for str {
    fn input_len(&self) -> usize {
        self.chars().count()
    }
}

impl InputLen for String {
    fn input_len(&self) -> usize {
        self.as_str().input_len()
    }
}

impl<T, S> InputLen for HashSet<T, S> {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl<T> InputLen for BTreeSet<T> {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> InputLen for HashMap<K, V, S> {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl<K, V> InputLen for BTreeMap<K, V> {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl<I: InputLen + ?Sized> InputLen for &I {
    fn input_len(&self) -> usize {
        (**self).input_len()
    }
}

/// Whether each recorded sample is echoed to stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Notice {
    #[default]
    Verbose,
    Quiet,
}

/// The four-line block echoed for each sample under [`Notice::Verbose`].
struct NoticeBlock<'a>(&'a Sample);

impl fmt::Display for NoticeBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "{}", s.function_name())?;
        writeln!(f, "    n   = {} values", s.input_size())?;
        writeln!(f, "    t   = {} ms", s.elapsed_ms())?;
        writeln!(f, "    n/t = {} values per ms", s.throughput())?;
        writeln!(f)
    }
}

/// Short display name for a function type: the last path segment, without
/// generic arguments. Closures come out as `parent::{{closure}}`; function
/// pointers keep their full signature.
fn display_name<F>() -> String {
    let full = std::any::type_name::<F>();
    let is_fn_pointer = ["fn(", "for<", "unsafe ", "extern "]
        .iter()
        .any(|p| full.starts_with(p));
    if is_fn_pointer {
        return full.to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    let mut segments = base.rsplit("::");
    match segments.next() {
        Some(last) if last.starts_with("{{") => match segments.next() {
            Some(parent) => format!("{parent}::{last}"),
            None => last.to_string(),
        },
        Some(last) => last.to_string(),
        None => full.to_string(),
    }
}

/// Appends samples for wrapped workloads to a shared store.
#[derive(Debug, Clone)]
pub struct Recorder {
    store: SampleStore,
    notice: Notice,
}

impl Recorder {
    pub fn new(store: SampleStore) -> Self {
        Self {
            store,
            notice: Notice::default(),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.set_notice(notice);
        self
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = notice;
    }

    pub fn notice(&self) -> Notice {
        self.notice
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Wrap `f`, naming its samples after the function item.
    ///
    /// `std::any::type_name` is best-effort. Every closure defined in the same
    /// function gets the same `parent::{{closure}}` name, so their samples
    /// share one pivot column and overwrite each other at equal sizes. Use
    /// [`Recorder::wrap_named`] for closures or when the column label matters.
    pub fn wrap<F>(&self, f: F) -> Timed<F> {
        Timed {
            name: display_name::<F>(),
            f,
            recorder: self.clone(),
        }
    }

    pub fn wrap_named<F>(&self, name: impl Into<String>, f: F) -> Result<Timed<F>> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(Timed {
            name,
            f,
            recorder: self.clone(),
        })
    }

    fn record(&self, name: &str, input_size: usize, elapsed: Duration) {
        let sample = Sample::from_duration(name, input_size, elapsed);

        if self.notice == Notice::Verbose {
            eprint!("{}", NoticeBlock(&sample));
        }
        tracing::debug!(
            function = sample.function_name(),
            n_values = sample.input_size(),
            t_milliseconds = sample.elapsed_ms(),
            values_per_ms = sample.throughput(),
            "sample recorded"
        );

        self.store.append(sample);
    }
}

/// A workload with the recording side effect attached.
///
/// The `call*` methods mirror the workload's own arity: `call` for `f(input)`,
/// `call_with` for `f(input, rest)` where `rest` is any further argument (use
/// a tuple for several). The `try_` forms record only on `Ok`.
#[derive(Debug, Clone)]
pub struct Timed<F> {
    name: String,
    f: F,
    recorder: Recorder,
}

impl<F> Timed<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unwrapped workload.
    pub fn inner(&self) -> &F {
        &self.f
    }

    pub fn call<'a, I, R>(&self, input: &'a I) -> R
    where
        I: InputLen + ?Sized,
        F: Fn(&'a I) -> R,
    {
        let (result, elapsed) = measure_once(|| (self.f)(input));
        self.recorder.record(&self.name, input.input_len(), elapsed);
        result
    }

    pub fn call_with<'a, I, A, R>(&self, input: &'a I, rest: A) -> R
    where
        I: InputLen + ?Sized,
        F: Fn(&'a I, A) -> R,
    {
        let (result, elapsed) = measure_once(|| (self.f)(input, rest));
        self.recorder.record(&self.name, input.input_len(), elapsed);
        result
    }

    pub fn try_call<'a, I, R, E>(&self, input: &'a I) -> std::result::Result<R, E>
    where
        I: InputLen + ?Sized,
        F: Fn(&'a I) -> std::result::Result<R, E>,
    {
        let (result, elapsed) = measure_once(|| (self.f)(input));
        let value = result?;
        self.recorder.record(&self.name, input.input_len(), elapsed);
        Ok(value)
    }

    pub fn try_call_with<'a, I, A, R, E>(&self, input: &'a I, rest: A) -> std::result::Result<R, E>
    where
        I: InputLen + ?Sized,
        F: Fn(&'a I, A) -> std::result::Result<R, E>,
    {
        let (result, elapsed) = measure_once(|| (self.f)(input, rest));
        let value = result?;
        self.recorder.record(&self.name, input.input_len(), elapsed);
        Ok(value)
    }
}
