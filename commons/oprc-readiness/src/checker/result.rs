use std::fmt;
use std::ops::Deref;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Informational detail, e.g. the scheduler's explanation for a pending Pod.
    Status,
    /// Problem detail that the user likely has to act on.
    Warning,
}

/// Dynamic detail attached to a [`ReadinessResult`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl Message {
    pub fn status(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Status,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outcome of a single readiness condition applied to one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessResult {
    pub ok: bool,
    /// Static label of the gate, e.g. `Waiting for Pod "foo" to be ready`.
    pub description: String,
    pub message: Option<Message>,
}

impl ReadinessResult {
    /// A failing result with no message; conditions flip `ok` once satisfied.
    pub fn waiting(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            description: description.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    pub fn severity(&self) -> Option<Severity> {
        self.message.as_ref().map(|m| m.severity)
    }
}

/// Renders as `[<ok>] <description>`, suffixed with ` -- <message>` when a
/// non-empty message is attached.
impl fmt::Display for ReadinessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.ok, self.description)?;
        match &self.message {
            Some(message) if !message.is_empty() => {
                write!(f, " -- {message}")
            }
            _ => Ok(()),
        }
    }
}

/// Ordered trail of the results evaluated during one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadinessResults(Vec<ReadinessResult>);

impl ReadinessResults {
    pub fn push(&mut self, result: ReadinessResult) {
        self.0.push(result);
    }

    pub fn into_inner(self) -> Vec<ReadinessResult> {
        self.0
    }

    /// Warning messages in trail order.
    pub fn warnings(&self) -> impl Iterator<Item = &Message> {
        self.0
            .iter()
            .filter_map(|r| r.message.as_ref())
            .filter(|m| m.severity == Severity::Warning)
    }
}

impl Deref for ReadinessResults {
    type Target = [ReadinessResult];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ReadinessResult>> for ReadinessResults {
    fn from(results: Vec<ReadinessResult>) -> Self {
        Self(results)
    }
}

impl IntoIterator for ReadinessResults {
    type Item = ReadinessResult;
    type IntoIter = std::vec::IntoIter<ReadinessResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReadinessResults {
    type Item = &'a ReadinessResult;
    type IntoIter = std::slice::Iter<'a, ReadinessResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One line per result, each terminated by `\n`.
impl fmt::Display for ReadinessResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.0 {
            writeln!(f, "{result}")?;
        }
        Ok(())
    }
}
