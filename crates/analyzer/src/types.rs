use serde::{Deserialize, Serialize};
use std::fmt;

/// One file's worth of content from a concatenated archive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSection {
    /// File path taken from the boundary marker; the section's identity
    pub path: String,

    /// Boundary marker plus adjacent separator lines, verbatim
    pub header: Vec<String>,

    /// Raw body lines (without terminators)
    pub body: Vec<String>,
}

impl FileSection {
    /// Create a new section
    #[must_use]
    pub fn new(path: impl Into<String>, header: Vec<String>, body: Vec<String>) -> Self {
        Self {
            path: path.into(),
            header,
            body,
        }
    }

    /// Body text joined with newlines
    #[must_use]
    pub fn code(&self) -> String {
        self.body.join("\n")
    }

    /// File name component of the path
    #[must_use]
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }
}

/// Final path component of a `/`-separated path
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Structural category of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    ApiRoute,
    Middleware,
    Hook,
    Service,
    Utility,
    Config,
    PageComponent,
    UiComponent,
    LayoutComponent,
    ContextProvider,
    TypeDefinition,
    Module,
}

impl Role {
    /// Human-readable label used in metadata lines
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiRoute => "API Route",
            Self::Middleware => "Middleware",
            Self::Hook => "Hook",
            Self::Service => "Service",
            Self::Utility => "Utility",
            Self::Config => "Config",
            Self::PageComponent => "Page Component",
            Self::UiComponent => "UI Component",
            Self::LayoutComponent => "Layout Component",
            Self::ContextProvider => "Context Provider",
            Self::TypeDefinition => "Type Definition",
            Self::Module => "Module",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature-flow ownership of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    /// Domain A only
    AffiliateOnly,
    /// Domain B only
    VendorOnly,
    MemberOnly,
    Shared,
}

impl Flow {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AffiliateOnly => "AFFILIATE ONLY",
            Self::VendorOnly => "VENDOR ONLY",
            Self::MemberOnly => "MEMBER ONLY",
            Self::Shared => "SHARED",
        }
    }

    /// Parse a rendered flow label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        [
            Self::AffiliateOnly,
            Self::VendorOnly,
            Self::MemberOnly,
            Self::Shared,
        ]
        .into_iter()
        .find(|flow| flow.as_str() == label.trim())
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution environment / framework tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    NextApiRoute,
    Node,
    ClientComponent,
    ServerAction,
    ServerComponent,
    TypeScript,
    NextJs,
}

impl Framework {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NextApiRoute => "Next.js API Route",
            Self::Node => "Node.js",
            Self::ClientComponent => "React (Client Component)",
            Self::ServerAction => "Next.js (Server Action)",
            Self::ServerComponent => "Next.js (Server Component)",
            Self::TypeScript => "TypeScript",
            Self::NextJs => "Next.js",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a state variable was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    /// `const [value, setValue] = useState(...)`
    UseState,
    /// `const [state, dispatch] = useReducer(...)`
    UseReducer,
}

impl StateKind {
    /// Name of the initializer call
    #[must_use]
    pub const fn call_name(self) -> &'static str {
        match self {
            Self::UseState => "useState",
            Self::UseReducer => "useReducer",
        }
    }
}

/// A declared local state variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateVar {
    pub name: String,
    /// Setter or dispatcher bound alongside the value
    pub setter: String,
    /// Declared or inferred type
    pub ty: String,
    /// Initial-value expression as written
    pub initial: String,
    pub kind: StateKind,
}

/// HTTP verb of an exported route handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            _ => None,
        }
    }
}

/// Target of a detected outbound call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// In-app or known-host path without interpolation
    Literal(String),
    /// Path with interpolations normalized to the placeholder token
    Parameterized(String),
    /// Path on some other host
    External { host: String, path: String },
    /// Exported route handler for a verb
    Handler(HttpVerb),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(path) | Self::Parameterized(path) => f.write_str(path),
            Self::External { host, path } => write!(f, "EXTERNAL:{host}{path}"),
            Self::Handler(verb) => write!(f, "HANDLER:{}", verb.as_str()),
        }
    }
}

/// Structured summary of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub role: Role,
    pub flow: Flow,
    pub framework: Framework,
    pub state: Vec<StateVar>,
    pub props: Vec<String>,
    pub contexts: Vec<String>,
    pub endpoints: Vec<Endpoint>,
    pub imports: Vec<String>,
}
