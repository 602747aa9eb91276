//! The command line shared by every context in a run.

/// Binary, optional namespace and pass-through arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    binary: String,
    namespace: Option<String>,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(binary: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            namespace: None,
            args,
        }
    }

    /// Empty namespaces are treated as absent.
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace.filter(|ns| !ns.is_empty());
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Arguments forwarded verbatim to every context.
    pub fn pass_through(&self) -> &[String] {
        &self.args
    }

    /// `--context <name> [--namespace <ns>] <pass-through...>`
    pub fn args_for(&self, context: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 4);
        argv.push("--context".to_string());
        argv.push(context.to_string());
        if let Some(ns) = &self.namespace {
            argv.push("--namespace".to_string());
            argv.push(ns.clone());
        }
        argv.extend(self.args.iter().cloned());
        argv
    }
}
