use std::collections::{HashMap, HashSet};
use std::sync::{LazyLock, Mutex};

use display_error_chain::ErrorChainExt;
use garde::Validate;
use googletest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_test::Token;

/// Parse a whitespace-separated string of hex byte pairs (e.g. `"50 CE 30 C0 D1"`) into bytes.
pub(crate) fn from_hex(s: &str) -> Vec<u8> {
    data_encoding::HEXUPPER.decode(s.replace(' ', "").as_bytes()).unwrap()
}

/// A lazily-constructed, named table of test cases, keyed by the `rstest` case name.
///
/// Besides lazily building the underlying map, this tracks which entries were actually retrieved
/// via [`LazyTestCases::get_test_case`] during a test run, so that [`test_all_test_cases_ran`] can
/// catch test cases that were added to the map but never wired up to an `#[case::...]` attribute.
pub(crate) struct LazyTestCases<T: 'static> {
    map: LazyLock<HashMap<&'static str, T>>,
    accessed: LazyLock<Mutex<HashSet<String>>>,
}

impl<T: 'static> LazyTestCases<T> {
    pub(crate) const fn new(f: fn() -> HashMap<&'static str, T>) -> Self {
        Self { map: LazyLock::new(f), accessed: LazyLock::new(|| Mutex::new(HashSet::new())) }
    }

    /// Looks up a test case given the full name of the currently-running (rstest-generated) test
    /// function, as obtained from [`stdext::function_name`].
    ///
    /// `rstest` names generated case functions like `case_1_some_case_name`; this strips the
    /// `case_<N>_` prefix and any enclosing module path before looking up the case by name.
    pub(crate) fn get_test_case(&self, function_name: &str) -> &T {
        let last_segment = function_name.rsplit("::").next().unwrap_or(function_name);
        let key = last_segment.splitn(3, '_').nth(2).unwrap_or(last_segment);
        self.accessed.lock().unwrap().insert(key.to_string());
        self.map.get(key).unwrap_or_else(|| panic!("no test case named {key} in this map"))
    }

    /// Returns the names of any test cases that were never retrieved.
    pub(crate) fn unaccessed(&self) -> Vec<&'static str> {
        let accessed = self.accessed.lock().unwrap();
        self.map.keys().filter(|name| !accessed.contains(**name)).copied().collect()
    }
}

/// Declares a lazily-built [`LazyTestCases`] map from alternating `"name", value` pairs.
macro_rules! test_case_map {
    ($($name:expr, $value:expr),+ $(,)?) => {
        crate::testutil::LazyTestCases::new(|| {
            let mut map = std::collections::HashMap::new();
            $(map.insert($name, $value);)+
            map
        })
    };
}

pub(crate) use test_case_map;

/// Generates a test that fails if any test case in one of the given [`LazyTestCases`] maps was
/// never retrieved by its corresponding parameterized test.
macro_rules! test_all_test_cases_ran {
    ($(($name:expr, $cases:expr)),+ $(,)?) => {
        #[googletest::test]
        fn test_all_test_cases_ran() {
            $({
                let unaccessed = $cases.unaccessed();
                assert!(
                    unaccessed.is_empty(),
                    "not all test cases for {} were run, missing #[case(...)] for: {:?}",
                    $name,
                    unaccessed
                );
            })+
        }
    };
}

pub(crate) use test_all_test_cases_ran;

#[derive(Debug)]
pub(crate) struct ValidateFailureTestCase<'a, T, C>
where
    T: Validate<Context = C>,
{
    pub(crate) value: T,
    pub(crate) err: &'a str,
    pub(crate) ctx: C,
}

/// Test validation failures of a value
pub(crate) fn run_validate_failure_test_case<T, C>(tc: &ValidateFailureTestCase<T, C>)
where
    T: Validate<Context = C>,
{
    let result = tc.value.validate_with(&tc.ctx);
    expect_that!(result.map_err(|e| e.chain().to_string()), err(eq(tc.err)));
}

#[derive(Debug)]
pub(crate) struct SerDeTestCase<'a, T>
where
    T: Serialize + Deserialize<'a> + PartialEq + std::fmt::Debug,
{
    pub(crate) value: T,
    pub(crate) tokens: &'a [Token],
}

#[derive(Debug)]
pub(crate) struct DeserializeErrorTestCase<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) err: &'a str,
}
