#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::SessionError;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Javascript,
    Python,
    Java,
    C,
    Cpp,
}

/// Starter snippet and identifying metadata for a language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub code: &'static str,
    pub extension: &'static str,
    pub display_name: &'static str,
}

impl Language {
    /// Strict lookup by wire id. Unknown ids are an integration error and are
    /// never mapped to a default language.
    pub fn parse(id: &str) -> Result<Language, SessionError> {
        return Language::iter()
            .find(|e| return e.to_string() == id)
            .ok_or_else(|| {
                return SessionError::Configuration(format!("unsupported language '{id}'"));
            });
    }

    pub fn template(&self) -> Template {
        match self {
            Language::Javascript => {
                return Template {
                    code: "// JavaScript\nconsole.log(\"Hello, World!\");",
                    extension: "js",
                    display_name: "JavaScript",
                }
            }
            Language::Python => {
                return Template {
                    code: "# Python\nprint(\"Hello, World!\")",
                    extension: "py",
                    display_name: "Python",
                }
            }
            Language::Java => {
                return Template {
                    code: "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello, World!\");\n    }\n}",
                    extension: "java",
                    display_name: "Java",
                }
            }
            Language::C => {
                return Template {
                    code: "#include <stdio.h>\n\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}",
                    extension: "c",
                    display_name: "C",
                }
            }
            Language::Cpp => {
                return Template {
                    code: "#include <iostream>\nusing namespace std;\n\nint main() {\n    cout << \"Hello, World!\" << endl;\n    return 0;\n}",
                    extension: "cpp",
                    display_name: "C++",
                }
            }
        }
    }

    /// Name shown in the active file tab.
    pub fn file_name(&self) -> String {
        return format!("main.{}", self.template().extension);
    }
}

/// Resolves a wire id straight to its template.
pub fn resolve(id: &str) -> Result<Template, SessionError> {
    return Ok(Language::parse(id)?.template());
}
