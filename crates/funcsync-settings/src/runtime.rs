//! Project languages and worker runtimes
//!
//! A local project declares a language; the platform reports a worker
//! runtime identifier. Compatibility checks compare the mapped runtime of
//! the local language against the remote identifier, and only when both
//! sides are recognized — unknown identifiers are skipped, never an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language of the local function project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectLanguage {
    JavaScript,
    TypeScript,
    CSharp,
    CSharpScript,
    Python,
    Java,
    PowerShell,
    /// Custom handlers have no fixed worker runtime.
    Custom,
}

impl ProjectLanguage {
    /// The worker runtime the platform expects for this language, if any.
    pub fn worker_runtime(self) -> Option<WorkerRuntime> {
        match self {
            ProjectLanguage::JavaScript | ProjectLanguage::TypeScript => Some(WorkerRuntime::Node),
            ProjectLanguage::CSharp | ProjectLanguage::CSharpScript => Some(WorkerRuntime::Dotnet),
            ProjectLanguage::Python => Some(WorkerRuntime::Python),
            ProjectLanguage::Java => Some(WorkerRuntime::Java),
            ProjectLanguage::PowerShell => Some(WorkerRuntime::PowerShell),
            ProjectLanguage::Custom => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectLanguage::JavaScript => "javascript",
            ProjectLanguage::TypeScript => "typescript",
            ProjectLanguage::CSharp => "csharp",
            ProjectLanguage::CSharpScript => "csharpscript",
            ProjectLanguage::Python => "python",
            ProjectLanguage::Java => "java",
            ProjectLanguage::PowerShell => "powershell",
            ProjectLanguage::Custom => "custom",
        }
    }
}

impl fmt::Display for ProjectLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" | "node" => Ok(ProjectLanguage::JavaScript),
            "typescript" | "ts" => Ok(ProjectLanguage::TypeScript),
            "csharp" | "c#" | "dotnet" => Ok(ProjectLanguage::CSharp),
            "csharpscript" => Ok(ProjectLanguage::CSharpScript),
            "python" => Ok(ProjectLanguage::Python),
            "java" => Ok(ProjectLanguage::Java),
            "powershell" => Ok(ProjectLanguage::PowerShell),
            "custom" => Ok(ProjectLanguage::Custom),
            _ => Err(format!("unrecognized project language \"{s}\"")),
        }
    }
}

/// Worker runtime identifier as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerRuntime {
    Node,
    Dotnet,
    Python,
    Java,
    PowerShell,
}

impl WorkerRuntime {
    /// Parse a remote-reported identifier. Identifiers are compared exactly;
    /// anything unrecognized returns `None` and is skipped by callers.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "node" => Some(WorkerRuntime::Node),
            "dotnet" => Some(WorkerRuntime::Dotnet),
            "python" => Some(WorkerRuntime::Python),
            "java" => Some(WorkerRuntime::Java),
            "powershell" => Some(WorkerRuntime::PowerShell),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkerRuntime::Node => "node",
            WorkerRuntime::Dotnet => "dotnet",
            WorkerRuntime::Python => "python",
            WorkerRuntime::Java => "java",
            WorkerRuntime::PowerShell => "powershell",
        }
    }
}

impl fmt::Display for WorkerRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
