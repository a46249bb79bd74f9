use std::path::Path;

/// Languages the toolkit recognizes by file extension.
///
/// The first group gets a heuristic validator; the second group is handled
/// natively by embedding editors and only participates in metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Python,
    Go,
    Rust,
    C,
    Cpp,
    Java,
    JavaScript,
    TypeScript,
    Json,
    Css,
    Html,
}

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "py" | "pyi" => Some(Self::Python),
            "go" => Some(Self::Go),
            "rs" => Some(Self::Rust),
            "c" | "h" => Some(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Some(Self::Cpp),
            "java" => Some(Self::Java),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "tsx" => Some(Self::TypeScript),
            "json" => Some(Self::Json),
            "css" => Some(Self::Css),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_ext(path.extension().and_then(|e| e.to_str()).unwrap_or(""))
    }

    /// The lowercase tag used for validator dispatch and CLI output.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Json => "json",
            Self::Css => "css",
            Self::Html => "html",
        }
    }
}
