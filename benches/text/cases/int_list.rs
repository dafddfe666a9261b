use super::super::Parseable;

/// Space separated unsigned integers.
#[derive(PartialEq, Eq, Debug)]
pub struct IntList {
    pub ints: Vec<u64>,
}

impl Parseable for IntList {
    type Param = usize;

    fn generate_case(param: Self::Param) -> Self {
        IntList {
            ints: (0..param as u64).map(|i| i * 7919).collect(),
        }
    }

    fn generate_text(&self) -> String {
        self.ints
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
