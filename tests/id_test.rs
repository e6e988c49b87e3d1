use idgraph::{GraphError, IdGenerator, IdGeneratorKind, IdentifierMap};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[test]
fn test_set_generator_reuses_gaps_before_fresh_ids() {
    let mut gen = IdGenerator::new(IdGeneratorKind::Set);
    assert_eq!(gen.get_id(Some(10)), Ok(10));

    // Every id below 10 is now available, smallest first
    for expected in 0..10 {
        assert_eq!(gen.get_id(None), Ok(expected));
    }
    assert_eq!(gen.get_id(None), Ok(11));
    assert_eq!(gen.get_id(Some(3)), Err(GraphError::IdInUse(3)));
}

#[test]
fn test_list_generator_is_lifo() {
    let mut gen = IdGenerator::new(IdGeneratorKind::List);
    for _ in 0..5 {
        gen.get_id(None).unwrap();
    }
    gen.release_id(1).unwrap();
    gen.release_id(3).unwrap();
    gen.release_id(2).unwrap();

    assert_eq!(gen.get_id(None), Ok(2));
    assert_eq!(gen.get_id(None), Ok(3));
    assert_eq!(gen.get_id(None), Ok(1));
    assert_eq!(gen.get_id(None), Ok(5));
}

#[test]
fn test_max_generator_never_reuses() {
    let mut gen = IdGenerator::new(IdGeneratorKind::Max);
    assert_eq!(gen.get_id(None), Ok(0));
    assert_eq!(gen.get_id(Some(4)), Ok(4));
    gen.release_id(4).unwrap();
    assert_eq!(gen.get_id(None), Ok(5));
    assert_eq!(gen.get_id(Some(2)), Err(GraphError::IdInUse(2)));
}

#[test]
fn test_release_errors() {
    let mut gen = IdGenerator::new(IdGeneratorKind::Set);
    gen.get_id(None).unwrap();
    assert_eq!(gen.release_id(7), Err(GraphError::IdOutOfRange(7)));
    gen.release_id(0).unwrap();
    assert_eq!(gen.release_id(0), Err(GraphError::IdNotInUse(0)));
}

#[test]
fn test_generator_kind_parsing() {
    assert_eq!("list".parse::<IdGeneratorKind>(), Ok(IdGeneratorKind::List));
    assert_eq!(
        "random".parse::<IdGeneratorKind>(),
        Err(GraphError::UnknownGenerator("random".to_string()))
    );
    assert_eq!(IdGeneratorKind::Max.to_string(), "max");
}

#[test]
fn test_identifier_map_round_trip() {
    let mut map: IdentifierMap<u64, &str> = IdentifierMap::new();
    let a = map.add("a", None).unwrap();
    let b = map.add("b", None).unwrap();
    assert_eq!((a, b), (0, 1));

    assert_eq!(map.add("again", Some(a)), Err(GraphError::KeyConflict(a)));
    assert_eq!(map.remove(a), Some("a"));
    assert_eq!(map.remove(a), None);
    assert_eq!(map.add("c", None), Ok(a));
    assert_eq!(map.get(a), Some(&"c"));

    assert_eq!(map.insert(b, "bb"), Ok(Some("b")));
    assert_eq!(map.insert(9, "i"), Ok(None));
    assert_eq!(map.add("gap", None), Ok(2));
    assert_eq!(map.len(), 4);
}

#[test]
fn test_identifier_map_copy_forgets_trailing_releases() {
    let mut map: IdentifierMap<u64, u64> = IdentifierMap::new();
    for i in 0..5 {
        map.add(i * 10, None).unwrap();
    }
    map.remove(4);
    map.remove(1);

    let cloned = map.clone();
    let mut copied = map.copy().unwrap();
    assert_eq!(cloned.generator().next_fresh(), 5);
    assert_eq!(copied.generator().next_fresh(), 4);
    assert_eq!(copied.len(), 3);

    assert_eq!(copied.add(0, None), Ok(1));
    assert_eq!(copied.add(0, None), Ok(4));
}

#[test]
fn test_identifier_map_update_is_unsupported() {
    let mut map: IdentifierMap<u64, u64> = IdentifierMap::new();
    assert!(matches!(
        map.update(vec![(1, 1)]),
        Err(GraphError::Unsupported(_))
    ));
    assert!(map.is_empty());
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    AddAt(u64),
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        1 => (0u64..64).prop_map(Op::AddAt),
        2 => any::<usize>().prop_map(Op::Remove),
    ]
}

fn kind_strategy() -> impl Strategy<Value = IdGeneratorKind> {
    prop_oneof![
        Just(IdGeneratorKind::Max),
        Just(IdGeneratorKind::Set),
        Just(IdGeneratorKind::List),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn identifier_map_matches_model(
        kind in kind_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        let mut map: IdentifierMap<u64, u64> = IdentifierMap::with_generator(kind);
        let mut live: BTreeSet<u64> = BTreeSet::new();

        for op in ops {
            let fresh = map.generator().next_fresh();
            let gaps: BTreeSet<u64> = (0..fresh).filter(|id| !live.contains(id)).collect();

            match op {
                Op::Add => {
                    let key = map.add(0, None).unwrap();
                    prop_assert!(!live.contains(&key));
                    match kind {
                        IdGeneratorKind::Max => {
                            prop_assert_eq!(key, fresh);
                        }
                        IdGeneratorKind::Set => {
                            prop_assert_eq!(key, gaps.first().copied().unwrap_or(fresh));
                        }
                        IdGeneratorKind::List => {
                            prop_assert!(gaps.contains(&key) || (gaps.is_empty() && key == fresh));
                        }
                    }
                    live.insert(key);
                }
                Op::AddAt(key) => {
                    let available = match kind {
                        IdGeneratorKind::Max => key >= fresh,
                        _ => !live.contains(&key),
                    };
                    let result = map.add(0, Some(key));
                    if available {
                        prop_assert_eq!(result, Ok(key));
                        live.insert(key);
                    } else {
                        prop_assert_eq!(result, Err(GraphError::KeyConflict(key)));
                    }
                }
                Op::Remove(index) => {
                    if live.is_empty() {
                        continue;
                    }
                    let key = *live.iter().nth(index % live.len()).unwrap();
                    prop_assert!(map.remove(key).is_some());
                    live.remove(&key);
                }
            }

            prop_assert_eq!(map.len(), live.len());
            prop_assert_eq!(map.keys().collect::<BTreeSet<_>>(), live.clone());
            for id in map.keys() {
                prop_assert!(id < map.generator().next_fresh());
                prop_assert!(!map.generator().is_reclaimed(id));
            }
        }
    }
}
