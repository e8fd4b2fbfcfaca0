//! School class metadata.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static CLASS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}").expect("class number pattern compiles"));

/// A class as listed on the school's timetable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    /// Display name such as `"10А"`.
    pub name: String,
    /// Grade parsed from the leading digits of the name.
    pub number: Option<u32>,
    /// Location of the class's timetable document.
    pub link: Option<String>,
    /// School building or department the class belongs to.
    pub department: Option<String>,
}

impl SchoolClass {
    pub fn new(name: impl Into<String>, link: Option<String>) -> Self {
        let name = name.into();
        let number = CLASS_NUMBER
            .find(name.trim())
            .and_then(|m| m.as_str().parse().ok());
        Self {
            name,
            number,
            link,
            department: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Group token used by the cell parser for this class.
    pub fn token(&self) -> &str {
        self.name.trim()
    }
}
