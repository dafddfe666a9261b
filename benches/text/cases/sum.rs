use super::super::Parseable;

/// `1+2+...+n`, parsed to its total.
#[derive(PartialEq, Eq, Debug)]
pub struct Sum {
    pub terms: u64,
    pub total: u64,
}

impl Parseable for Sum {
    type Param = u64;

    fn generate_case(param: Self::Param) -> Self {
        Sum {
            terms: param,
            total: (1..=param).sum(),
        }
    }

    fn generate_text(&self) -> String {
        (1..=self.terms)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("+")
    }
}
