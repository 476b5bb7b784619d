//! Static mapping from ecosystem tag to its ordered validation commands.

use crate::ecosystem::EcosystemTag;

/// One external static-check invocation: a program plus a literal argument
/// vector. Arguments are handed to the OS as-is, never through a shell, so
/// hostile filenames in the working directory cannot inject anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl ValidationCommand {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    /// The command line as it appears in reports.
    pub fn display(&self) -> String {
        std::iter::once(self.program)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const NODEJS: &[ValidationCommand] = &[
    ValidationCommand::new("npx", &["eslint", "--cache", "."]),
    ValidationCommand::new("npx", &["prettier", "--check", "."]),
    ValidationCommand::new("npx", &["tsc", "--noEmit"]),
];

const PYTHON: &[ValidationCommand] = &[
    ValidationCommand::new("ruff", &["check", "."]),
    ValidationCommand::new("mypy", &["."]),
    ValidationCommand::new("pylint", &["."]),
];

const RUST: &[ValidationCommand] = &[
    ValidationCommand::new("cargo", &["check"]),
    ValidationCommand::new("cargo", &["clippy", "--", "-D", "warnings"]),
];

const GO: &[ValidationCommand] = &[
    ValidationCommand::new("go", &["vet", "./..."]),
    ValidationCommand::new("go", &["fmt", "./..."]),
];

const JAVA: &[ValidationCommand] = &[ValidationCommand::new("mvn", &["test"])];

const DOTNET: &[ValidationCommand] = &[ValidationCommand::new("dotnet", &["build"])];

/// Ordered validation commands for `tag`.
///
/// Pure lookup with no failure mode: tags without configured checks get an
/// empty slice, which the runner reports as "nothing to check" rather than
/// an error. Sequence order is significant (type-check before lint) and is
/// preserved verbatim in reports.
pub fn commands_for(tag: EcosystemTag) -> &'static [ValidationCommand] {
    match tag {
        EcosystemTag::Nodejs => NODEJS,
        EcosystemTag::Python => PYTHON,
        EcosystemTag::Rust => RUST,
        EcosystemTag::Go => GO,
        EcosystemTag::Java => JAVA,
        EcosystemTag::Dotnet => DOTNET,
        EcosystemTag::Ruby | EcosystemTag::Default => &[],
    }
}
