// Integration tests for `cli::op_mode`: defaults taken from the
// environment. The `*_from` variants are used so tests never touch the
// process environment.

use rdeflate::cli::op_mode::{init_c_level_from, init_nb_workers_from, OpMode};
use rdeflate::config::{
    DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL, MIN_COMPRESSION_LEVEL, NB_WORKERS_DEFAULT,
    NB_WORKERS_MAX,
};

#[test]
fn every_valid_level_is_accepted() {
    for level in MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL {
        assert_eq!(init_c_level_from(Some(&level.to_string())), level);
    }
}

#[test]
fn invalid_levels_fall_back_to_default() {
    for value in ["", "-3", "6.5", "99999999999", "six"] {
        assert_eq!(init_c_level_from(Some(value)), DEFAULT_COMPRESSION_LEVEL, "{value:?}");
    }
}

#[test]
fn worker_counts() {
    assert_eq!(init_nb_workers_from(Some("1")), 1);
    assert_eq!(init_nb_workers_from(Some(&NB_WORKERS_MAX.to_string())), NB_WORKERS_MAX);
    assert_eq!(init_nb_workers_from(Some("201")), NB_WORKERS_MAX);
    assert_eq!(init_nb_workers_from(Some("-1")), NB_WORKERS_DEFAULT);
}

#[test]
fn modes_are_distinct() {
    assert_ne!(OpMode::Compress, OpMode::Decompress);
    assert_ne!(OpMode::Decompress, OpMode::Test);
    assert_eq!(format!("{:?}", OpMode::Test), "Test");
}
