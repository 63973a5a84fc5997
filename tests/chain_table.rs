use chain_table::{hash_params, ChainTable, HashParams, ShrinkPolicy, TableConfig, TableError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn seeded(seed: u64) -> ChainTable {
    ChainTable::with_params(HashParams::from_seed(seed))
}

#[test]
fn scenario_a_single_insert() {
    init_tracing();
    let mut t = ChainTable::new();
    t.insert("a", "1").expect("insert ok");
    assert!(t.contains("a"));
    assert_eq!(t.search("a").unwrap().as_deref(), Some("1"));
    assert_eq!(t.search("b").unwrap(), None);
}

#[test]
fn scenario_b_growth_at_seventeenth_key() {
    init_tracing();
    let mut t = seeded(17);
    assert_eq!(t.bucket_count(), 0);
    t.insert("key-0", "v").unwrap();
    assert_eq!(t.bucket_count(), 16);
    for i in 1..16 {
        t.insert(&format!("key-{i}"), "v").unwrap();
        assert_eq!(t.bucket_count(), 16);
    }
    assert_eq!((t.len(), t.bucket_count()), (16, 16));
    t.insert("key-16", "v").unwrap();
    assert_eq!((t.len(), t.bucket_count()), (17, 32));
    for i in 0..17 {
        assert_eq!(t.get(&format!("key-{i}")), Some("v"));
    }
}

#[test]
fn scenario_c_overwrite() {
    let mut t = seeded(1);
    t.insert("x", "1").unwrap();
    t.insert("x", "2").unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.search("x").unwrap().as_deref(), Some("2"));
}

#[test]
fn scenario_d_insert_then_remove() {
    init_tracing();
    let mut t = seeded(2);
    t.insert("k", "v").unwrap();
    assert_eq!(t.remove("k").as_deref(), Some("v"));
    assert!(!t.contains("k"));
    assert!(t.is_empty());
    assert_eq!(t.bucket_count(), 16);
    assert_eq!(t.dump(), "{}\n");
}

#[test]
fn removing_absent_key_changes_nothing() {
    let mut t = seeded(3);
    for i in 0..40 {
        t.insert(&format!("h{i}"), &i.to_string()).unwrap();
    }
    let before = (t.len(), t.bucket_count(), t.to_string());
    assert_eq!(t.remove("missing"), None);
    assert_eq!((t.len(), t.bucket_count(), t.to_string()), before);
}

#[test]
fn never_used_table_misses_quietly() {
    let mut t = ChainTable::default();
    assert!(!t.contains("anything"));
    assert_eq!(t.search("anything").unwrap(), None);
    assert_eq!(t.remove("anything"), None);
    assert_eq!(t.len(), 0);
    assert_eq!(t.bucket_count(), 0);
}

/// Every key present before a resize is still there, with its value, after.
#[test]
fn keys_survive_growth_and_shrink() {
    init_tracing();
    for policy in [ShrinkPolicy::Eager, ShrinkPolicy::Sparse] {
        let mut t = ChainTable::with_config(
            TableConfig::new()
                .with_params(HashParams::from_seed(11))
                .with_shrink_policy(policy),
        );
        for i in 0..500 {
            let before = t.bucket_count();
            t.insert(&format!("/route/{i}"), &format!("handler-{i}")).unwrap();
            if t.bucket_count() != before {
                for j in 0..=i {
                    assert_eq!(t.get(&format!("/route/{j}")), Some(format!("handler-{j}").as_str()));
                }
            }
        }
        for i in 0..480 {
            let before = t.bucket_count();
            t.remove(&format!("/route/{i}"));
            if t.bucket_count() != before {
                for j in i + 1..500 {
                    assert!(t.contains(&format!("/route/{j}")), "{policy:?} lost /route/{j}");
                }
            }
        }
        assert_eq!(t.len(), 20);
        assert_eq!(t.iter().count(), 20);
    }
}

#[test]
fn dump_lists_every_entry_with_trailing_separator() {
    let mut t = seeded(5);
    t.insert("host", "example.org").unwrap();
    t.insert("accept", "*/*").unwrap();
    let dump = t.dump();
    assert!(dump.starts_with('{'));
    assert!(dump.ends_with(", }\n"));
    assert!(dump.contains(r#""host":"example.org", "#));
    assert!(dump.contains(r#""accept":"*/*", "#));
    assert_eq!(dump.matches(", ").count(), 2);
}

#[test]
fn tables_share_process_parameters() {
    let p = *hash_params::init();
    assert_eq!(ChainTable::new().params(), &p);
    assert_eq!(ChainTable::new().params(), &p);
    assert_eq!(hash_params::global(), Some(&p));
}

#[test]
fn invalid_coefficients_rejected() {
    let err = HashParams::new(0, 1).unwrap_err();
    assert!(matches!(err, TableError::InvalidCoefficient { name: "a", .. }));
}

#[test]
fn table_can_move_across_threads() {
    let mut t = seeded(8);
    t.insert("a", "1").unwrap();
    let t = std::thread::spawn(move || {
        let mut t = t;
        t.insert("b", "2").unwrap();
        t
    })
    .join()
    .unwrap();
    assert_eq!(t.len(), 2);
}
