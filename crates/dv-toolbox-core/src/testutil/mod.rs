mod test_cases;

pub(crate) use test_cases::*;
