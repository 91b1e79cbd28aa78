//! End-to-end tests for the `meihua` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

const AT: &str = "2024-10-30 10:00:00";

fn meihua() -> Command {
    Command::cargo_bin("meihua").unwrap()
}

#[test]
fn divine_reference_number() {
    meihua()
        .args(["divine", "746 财运如何", "--at", AT])
        .assert()
        .success()
        .stdout(predicate::str::contains("山泽损"))
        .stdout(predicate::str::contains("互见坤震(地雷复)"))
        .stdout(predicate::str::contains("山雷颐"))
        .stdout(predicate::str::contains("财运如何"))
        .stdout(predicate::str::contains("2024-10-30 10:00:00 巳时"))
        .stdout(predicate::str::contains("东北"))
        .stdout(predicate::str::contains("14"));
}

#[test]
fn divine_json() {
    meihua()
        .args(["divine", "746", "--at", AT, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ben_gua": "山泽损""#))
        .stdout(predicate::str::contains(r#""bian_gua_ji_xiong": "小凶""#))
        .stdout(predicate::str::contains(r#""ying_qi": 14"#))
        .stdout(predicate::str::contains(r#""was_random": false"#));
}

#[test]
fn divine_without_number_discloses_fallback() {
    meihua()
        .args(["divine", "看看今天", "--at", AT, "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("随机数"));
}

#[test]
fn divine_seed_is_reproducible() {
    let first = meihua()
        .args(["divine", "看看今天", "--at", AT, "--seed", "7", "--json"])
        .output()
        .unwrap();
    let second = meihua()
        .args(["divine", "看看今天", "--at", AT, "--seed", "7", "--json"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn divine_rejects_bad_time() {
    meihua()
        .args(["divine", "746", "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid --at"));
}

#[test]
fn prompt_command() {
    meihua()
        .args(["prompt", "746财运如何", "--at", AT])
        .assert()
        .success()
        .stdout(predicate::str::contains("求卦者的问题：财运如何"))
        .stdout(predicate::str::contains("本卦：山泽损，用生体，小吉"))
        .stdout(predicate::str::contains("150"));
}

#[test]
fn reply_command() {
    meihua()
        .args(["reply", "算卦 746", "-i", "先损后益。", "--at", AT])
        .assert()
        .success()
        .stdout(predicate::str::contains("报数：746"))
        .stdout(predicate::str::contains("变卦：山雷颐，体克用，小凶"))
        .stdout(predicate::str::contains("先损后益。"));
}

#[test]
fn reply_ignores_plain_chat() {
    meihua()
        .args(["reply", "你好 746", "-i", "x", "--at", AT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a divination request."));
}

#[test]
fn reply_rejects_empty_interpretation() {
    meihua()
        .args(["reply", "算卦 746", "-i", "  ", "--at", AT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: 解读结果为空"));
}

#[test]
fn analyse_command() {
    meihua()
        .args(["analyse", "1", "6", "--host", "upper", "--month", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("体生用"))
        .stdout(predicate::str::contains("大凶"));
}

#[test]
fn analyse_json() {
    meihua()
        .args(["analyse", "7", "2", "--month", "9", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""relation": "GuestGeneratesHost""#));
}

#[test]
fn analyse_rejects_bad_trigram() {
    meihua()
        .args(["analyse", "9", "1", "--month", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn trigrams_command() {
    meihua()
        .arg("trigrams")
        .assert()
        .success()
        .stdout(predicate::str::contains("乾"))
        .stdout(predicate::str::contains("西南"));
}

#[test]
fn hexagrams_command() {
    meihua()
        .arg("hexagrams")
        .assert()
        .success()
        .stdout(predicate::str::contains("山泽损"))
        .stdout(predicate::str::contains("64 hexagrams"));
}

#[test]
fn hexagram_by_name() {
    meihua()
        .args(["hexagrams", "山泽损"])
        .assert()
        .success()
        .stdout(predicate::str::contains("互卦 地雷复"));
}

#[test]
fn hexagram_unknown_name() {
    meihua()
        .args(["hexagrams", "不存在"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown hexagram"));
}
