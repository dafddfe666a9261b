use super::super::Parseable;

/// `x` wrapped in `depth` parentheses.
#[derive(PartialEq, Eq, Debug)]
pub struct Nested {
    pub depth: usize,
}

impl Parseable for Nested {
    type Param = usize;

    fn generate_case(param: Self::Param) -> Self {
        Nested { depth: param }
    }

    fn generate_text(&self) -> String {
        format!("{}x{}", "(".repeat(self.depth), ")".repeat(self.depth))
    }
}
