//! Ordered collection of cases bound to the tool they exercise.

use crate::case::TestCase;
use crate::tool::Tool;

/// A tool under test plus its cases, in reporting order.
pub struct Suite {
    tool: Tool,
    cases: Vec<Box<dyn TestCase>>,
}

impl Suite {
    pub fn new(tool: Tool, cases: Vec<Box<dyn TestCase>>) -> Self {
        Self { tool, cases }
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn cases(&self) -> &[Box<dyn TestCase>] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl std::fmt::Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.cases.iter().map(|c| c.label()).collect();
        f.debug_struct("Suite")
            .field("tool", &self.tool.name())
            .field("cases", &labels)
            .finish()
    }
}
