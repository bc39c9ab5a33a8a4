use googletest::prelude::*;
use rstest::rstest;
use stdext::function_name;
use testutil::*;

use super::super::*;
use crate::{block::testutil::*, pack::PackContext, testutil::*};

test_all_test_cases_ran!(
    ("test_try_from_raw", &TRY_FROM_RAW_TEST_CASES),
    ("test_validate", &VALIDATE_TEST_CASES)
);

#[derive(Debug)]
struct TryFromRawTestCase<'a> {
    input: [u8; 3],
    parsed: Option<BlockId>,
    err: Option<&'a str>,
}

static TRY_FROM_RAW_TEST_CASES: LazyTestCases<TryFromRawTestCase> = test_case_map!(
    "header",
    TryFromRawTestCase {
        input: [0x1F, 0xF7, 0x00],
        parsed: Some(BlockId {
            block_type: BlockType::Header,
            sequence: 0xF,
            channel: 0,
            dif_sequence: 0xF,
            dif_block: 0x00,
        }),
        err: None,
    },
    "video",
    TryFromRawTestCase {
        input: [0x93, 0x2F, 0x42],
        parsed: Some(BlockId {
            block_type: BlockType::Video,
            sequence: 0x3,
            channel: 1,
            dif_sequence: 0x2,
            dif_block: 0x42,
        }),
        err: None,
    },
    "reserved_0_cleared",
    TryFromRawTestCase {
        input: [0x0F, 0xF7, 0x00],
        parsed: None,
        err: Some("reserved bits in DIF block identifier were unexpectedly cleared"),
    },
    "reserved_1_cleared",
    TryFromRawTestCase {
        input: [0x1F, 0xF0, 0x00],
        parsed: None,
        err: Some("reserved bits in DIF block identifier were unexpectedly cleared"),
    },
    "unknown_block_type",
    TryFromRawTestCase {
        input: [0xBF, 0xF7, 0x00],
        parsed: None,
        err: Some("DIF block identifier has unrecognized block type value 0x5"),
    }
);

#[googletest::test]
#[rstest]
#[case::header(function_name!())]
#[case::video(function_name!())]
#[case::reserved_0_cleared(function_name!())]
#[case::reserved_1_cleared(function_name!())]
#[case::unknown_block_type(function_name!())]
fn test_try_from_raw(#[case] test_function_name: &str) {
    let tc = TRY_FROM_RAW_TEST_CASES.get_test_case(test_function_name);
    let result = BlockId::try_from_raw(&tc.input);
    match tc.err {
        None => expect_that!(result, ok(eq(tc.parsed.unwrap()))),
        Some(msg) => expect_that!(result.map_err(|e| e.to_string()), err(eq(msg))),
    }
}

#[googletest::test]
fn test_to_raw_round_trip() {
    let id = BlockId {
        block_type: BlockType::Audio,
        sequence: 0x4,
        channel: 1,
        dif_sequence: 0x7,
        dif_block: 0x03,
    };
    let raw = id.to_raw();
    expect_that!(BlockId::try_from_raw(&raw), ok(eq(id)));
}

static VALIDATE_TEST_CASES: LazyTestCases<ValidateFailureTestCase<BlockId, PackContext>> = test_case_map!(
    "header_bad_sequence",
    ValidateFailureTestCase {
        value: BlockId {
            block_type: BlockType::Header,
            sequence: 0x3,
            channel: 0,
            dif_sequence: 0,
            dif_block: 0,
        },
        err: "sequence: header or subcode block has unexpected non-0xF sequence number of \
            0x3\n",
        ctx: *NTSC,
    },
    "dif_sequence_too_high_ntsc",
    ValidateFailureTestCase {
        value: BlockId {
            block_type: BlockType::Video,
            sequence: 0x0,
            channel: 0,
            dif_sequence: 10,
            dif_block: 0,
        },
        err: "dif_sequence: DIF sequence number 10 is too high for system 525-60\n",
        ctx: *NTSC,
    },
    "dif_block_too_high",
    ValidateFailureTestCase {
        value: BlockId {
            block_type: BlockType::Subcode,
            sequence: 0xF,
            channel: 0,
            dif_sequence: 0,
            dif_block: 2,
        },
        err: "dif_block: DIF block number 2 is too high for a block type of Subcode\n",
        ctx: *NTSC,
    }
);

#[googletest::test]
#[rstest]
#[case::header_bad_sequence(function_name!())]
#[case::dif_sequence_too_high_ntsc(function_name!())]
#[case::dif_block_too_high(function_name!())]
fn test_validate(#[case] test_function_name: &str) {
    let tc = VALIDATE_TEST_CASES.get_test_case(test_function_name);
    run_validate_failure_test_case(tc);
}
