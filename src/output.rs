use serde::Serialize;

/// One entry of the session's output log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum OutputRecord {
    Text(String),
    Error(String),
    /// echo of the command line that produced the records after it
    Header(String),
}

impl OutputRecord {
    pub fn text(content: impl Into<String>) -> Self {
        OutputRecord::Text(content.into())
    }

    pub fn error(content: impl Into<String>) -> Self {
        OutputRecord::Error(content.into())
    }

    pub fn header(command: impl Into<String>) -> Self {
        OutputRecord::Header(command.into())
    }

    pub fn is_header(&self) -> bool {
        matches!(self, OutputRecord::Header(_))
    }

    pub fn content(&self) -> &str {
        match self {
            OutputRecord::Text(s) | OutputRecord::Error(s) | OutputRecord::Header(s) => s,
        }
    }

    pub fn class(&self) -> LineClass {
        match self {
            OutputRecord::Text(_) => LineClass::Text,
            OutputRecord::Error(_) => LineClass::Error,
            OutputRecord::Header(_) => LineClass::Header,
        }
    }
}

/// Visual styling of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineClass {
    Text,
    Error,
    Header,
}

impl LineClass {
    pub fn css_class(self) -> &'static str {
        match self {
            LineClass::Text => "text-output",
            LineClass::Error => "error-output",
            LineClass::Header => "header-output",
        }
    }
}
