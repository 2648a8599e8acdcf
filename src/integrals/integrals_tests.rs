use itertools::Itertools;

use crate::integrals::{canonicalize, CanonicalKey, IntegralKind, OrbitalIntegral};
use crate::permutation::Permutation;

#[test]
fn test_integrals_symmetry_group_orders() {
    assert_eq!(IntegralKind::Nuclear.symmetry_group().len(), 1);
    assert_eq!(IntegralKind::OneElectron.symmetry_group().len(), 2);
    assert_eq!(IntegralKind::TwoElectron.symmetry_group().len(), 8);

    for kind in [
        IntegralKind::Nuclear,
        IntegralKind::OneElectron,
        IntegralKind::TwoElectron,
    ] {
        let group = kind.symmetry_group();
        assert_eq!(group.get_index(0).unwrap(), &Permutation::identity(kind.rank()));
        assert!(group.iter().all(|perm| perm.rank() == kind.rank()));
        for (a, b) in group.iter().cartesian_product(group.iter()) {
            assert!(group.contains(&(a * b)));
        }
    }
}

#[test]
fn test_integrals_two_electron_group_elements() {
    let mut images = IntegralKind::TwoElectron
        .symmetry_group()
        .iter()
        .map(|perm| perm.image().clone())
        .collect_vec();
    images.sort();
    assert_eq!(
        images,
        vec![
            vec![0, 1, 2, 3],
            vec![0, 2, 1, 3],
            vec![1, 0, 3, 2],
            vec![1, 3, 0, 2],
            vec![2, 0, 3, 1],
            vec![2, 3, 0, 1],
            vec![3, 1, 2, 0],
            vec![3, 2, 1, 0],
        ]
    );
}

#[test]
fn test_integrals_kind_from_rank() {
    assert_eq!(IntegralKind::from_rank(0).unwrap(), IntegralKind::Nuclear);
    assert_eq!(IntegralKind::from_rank(2).unwrap(), IntegralKind::OneElectron);
    assert_eq!(IntegralKind::from_rank(4).unwrap(), IntegralKind::TwoElectron);
    assert!(IntegralKind::from_rank(1).is_err());
    assert!(IntegralKind::from_rank(3).is_err());
    assert!(IntegralKind::from_rank(6).is_err());
}

#[test]
fn test_integrals_canonicalize_one_electron() {
    let key_01 = canonicalize(&[0, 1]).unwrap();
    let key_10 = canonicalize(&[1, 0]).unwrap();
    assert_eq!(key_01, key_10);
    assert_eq!(key_01.indices(), &[0, 1]);
    assert_eq!(key_01.kind(), IntegralKind::OneElectron);
    assert_eq!(key_01.to_string(), "(0, 1)");

    assert_eq!(canonicalize(&[3, 3]).unwrap().indices(), &[3, 3]);
    assert_ne!(canonicalize(&[0, 1]).unwrap(), canonicalize(&[0, 2]).unwrap());
}

#[test]
fn test_integrals_canonicalize_two_electron() {
    let key = canonicalize(&[0, 1, 2, 3]).unwrap();
    assert_eq!(key.indices(), &[0, 1, 2, 3]);
    for equivalent in [
        [1, 0, 3, 2],
        [2, 3, 0, 1],
        [3, 2, 1, 0],
        [0, 2, 1, 3],
        [2, 0, 3, 1],
        [1, 3, 0, 2],
        [3, 1, 2, 0],
    ] {
        assert_eq!(canonicalize(&equivalent).unwrap(), key);
    }

    // Not related to (0, 1, 2, 3) by any real-orbital symmetry.
    assert_ne!(canonicalize(&[0, 1, 3, 2]).unwrap(), key);
    assert_ne!(canonicalize(&[0, 3, 2, 1]).unwrap(), key);

    assert_eq!(canonicalize(&[3, 2, 1, 1]).unwrap().indices(), &[1, 1, 2, 3]);
}

#[test]
fn test_integrals_canonicalize_idempotent() {
    for indices in (0..4).permutations(4).chain((0..3).permutations(2)) {
        let key = canonicalize(&indices).unwrap();
        assert_eq!(canonicalize(key.indices()).unwrap(), key);
    }
}

#[test]
fn test_integrals_canonicalize_orbit_consistency() {
    // Every member of an orbit canonicalises to the same key, and that key is a member.
    for indices in [[0, 0, 1, 1], [0, 1, 0, 1], [2, 0, 1, 0], [4, 1, 3, 2]] {
        let key = canonicalize(&indices).unwrap();
        let orbit = IntegralKind::TwoElectron
            .symmetry_group()
            .iter()
            .map(|perm| perm.rearrange(&indices).unwrap())
            .collect_vec();
        assert!(orbit.iter().any(|member| member.as_slice() == key.indices()));
        for member in orbit.iter() {
            assert_eq!(canonicalize(member).unwrap(), key);
            assert!(key.indices() <= member.as_slice());
        }
    }
}

#[test]
fn test_integrals_canonicalize_invalid_rank() {
    assert!(canonicalize(&[0]).is_err());
    assert!(canonicalize(&[0, 1, 2]).is_err());
    let nuclear = canonicalize(&[]).unwrap();
    assert!(nuclear.indices().is_empty());
    assert_eq!(nuclear.kind(), IntegralKind::Nuclear);
    assert_eq!(nuclear.max_index(), None);
}

#[test]
fn test_integrals_orbital_integral() {
    let integral = OrbitalIntegral::new(&[3, 1, 2, 0], 0.25);
    assert_eq!(integral.kind().unwrap(), IntegralKind::TwoElectron);
    assert_eq!(integral.canonical_key().unwrap().indices(), &[0, 1, 2, 3]);
    assert_eq!(integral.canonical_key().unwrap().max_index(), Some(3));
    assert_eq!(integral.to_string(), "(3, 1, 2, 0) = 0.25");
    assert!(OrbitalIntegral::new(&[1, 2, 3], 1.0).kind().is_err());
}

#[test]
fn test_integrals_canonical_key_deserialize() {
    let key: CanonicalKey = serde_yaml::from_str("[0, 1, 1, 0]").unwrap();
    assert_eq!(key, canonicalize(&[1, 0, 0, 1]).unwrap());
    assert_eq!(
        serde_yaml::to_string(&key).unwrap(),
        serde_yaml::to_string(&vec![0, 1, 1, 0]).unwrap()
    );

    // Tuples of the wrong length or in non-canonical order are rejected.
    assert!(serde_yaml::from_str::<CanonicalKey>("[0, 1, 2]").is_err());
    assert!(serde_yaml::from_str::<CanonicalKey>("[1, 0]").is_err());
    assert!(serde_yaml::from_str::<CanonicalKey>("[3, 2, 1, 0]").is_err());

    let bytes = bincode::serialize(&vec![2_usize, 1, 0]).unwrap();
    assert!(bincode::deserialize::<CanonicalKey>(&bytes).is_err());
}
