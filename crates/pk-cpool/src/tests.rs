use crate::*;
use pk_core::PackError;

// ========== Interning ==========

#[test]
fn test_same_literal_same_index() {
    let mut cp = CpBands::new();
    let a = cp.intern_utf8("value");
    let b = cp.intern_utf8("value");
    assert_eq!(a, b);
    assert_eq!(cp.len(PoolKind::Utf8), 1);
}

#[test]
fn test_first_seen_order() {
    let mut cp = CpBands::new();
    assert_eq!(cp.intern_descriptor("Lfoo/Bar;"), 0);
    assert_eq!(cp.intern_descriptor("Lfoo/Baz;"), 1);
    assert_eq!(cp.intern_descriptor("Lfoo/Bar;"), 0);
}

#[test]
fn test_pools_are_separate_index_spaces() {
    let mut cp = CpBands::new();
    assert_eq!(cp.intern_utf8("Lfoo/Bar;"), 0);
    assert_eq!(cp.intern_descriptor("Lfoo/Bar;"), 0);
    assert_eq!(cp.intern_constant(Constant::Int(7)), 0);
    assert_eq!(cp.intern_constant(Constant::Long(7)), 0);
    assert_eq!(cp.intern_constant(Constant::Int(8)), 1);
    assert_eq!(cp.len(PoolKind::Int), 2);
    assert_eq!(cp.len(PoolKind::Long), 1);
    assert_eq!(cp.len(PoolKind::Double), 0);
}

#[test]
fn test_float_identity_is_bitwise() {
    let mut cp = CpBands::new();
    let pos = cp.intern_constant(Constant::Double(0.0));
    let neg = cp.intern_constant(Constant::Double(-0.0));
    assert_ne!(pos, neg);
    let nan1 = cp.intern_constant(Constant::Float(f32::NAN));
    let nan2 = cp.intern_constant(Constant::Float(f32::NAN));
    assert_eq!(nan1, nan2);
}

#[test]
fn test_empty_pool() {
    let cp = CpBands::default();
    assert!(cp.is_empty());
}

// ========== Lookup ==========

#[test]
fn test_lookup_resolves_interned() {
    let mut cp = CpBands::new();
    let d = cp.intern_descriptor("Ljava/lang/Deprecated;");
    let u = cp.intern_utf8("since");
    let c = cp.intern_constant(Constant::Float(1.5));
    assert_eq!(cp.descriptor(d as i64).unwrap(), "Ljava/lang/Deprecated;");
    assert_eq!(cp.utf8(u as i64).unwrap(), "since");
    assert_eq!(cp.constant(PoolKind::Float, c as i64).unwrap(), Constant::Float(1.5));
}

#[test]
fn test_lookup_miss() {
    let cp = CpBands::new();
    let err = cp.utf8(3).unwrap_err();
    assert!(matches!(err, PackError::UnresolvedReference { pool: "cp_Utf8", index: 3 }));
    assert!(cp.descriptor(-1).is_err());
    assert!(cp.constant(PoolKind::Long, 0).is_err());
    assert!(cp.constant(PoolKind::Utf8, 0).is_err());
}
