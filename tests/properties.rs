//! Property tests for the adaptation layer and the capture service.
//!
//! Every adaptor below uses round-trip converters, so its target-domain answers must agree with
//! the same question asked directly in the source domain.

use std::collections::HashSet;
use std::convert::TryFrom;

use proptest::prelude::*;

use lesk_adapt::{
  AdaptContext, AdaptError, AdaptPolicy, CaptureService, ConstAdaptor, Operand, RangeAdaptor,
  RangeViolation, SetAdaptor,
};

// region Strategies

fn arb_policy() -> impl Strategy<Value = AdaptPolicy> {
  prop_oneof![Just(AdaptPolicy::AlwaysAdapt), Just(AdaptPolicy::AdaptOnceAtInit)]
}

/// Any `char`, which for a `u8`-sourced adaptor is mostly outside the source domain.
fn arb_candidate() -> impl Strategy<Value = char> {
  prop_oneof![
    any::<u8>().prop_map(char::from),
    any::<char>(),
  ]
}

fn ascii(policy: AdaptPolicy) -> AdaptContext<u8, char> {
  AdaptContext::widening(policy)
}

// endregion

proptest! {
  #[test]
  fn prop_ordered_bounds_construct(a in any::<u8>(), b in any::<u8>(), policy in arb_policy()) {
    let (low, high) = (a.min(b), a.max(b));
    let range = RangeAdaptor::new(low, high, ascii(policy)).unwrap();

    prop_assert!(range.minimum().unwrap() <= range.maximum().unwrap());
    prop_assert_eq!(range.minimum().unwrap(), char::from(low));
    prop_assert_eq!(range.maximum().unwrap(), char::from(high));
  }

  #[test]
  fn prop_reversed_bounds_rejected(a in any::<u8>(), b in any::<u8>()) {
    prop_assume!(a != b);
    let (low, high) = (a.min(b), a.max(b));

    match RangeAdaptor::new(high, low, ascii(AdaptPolicy::AlwaysAdapt)) {
      Err(AdaptError::InvalidRangeConstruction(RangeViolation::MinExceedsMax)) => {}
      other => prop_assert!(false, "unexpected result: {:?}", other.map(|_| ())),
    }
  }

  #[test]
  fn prop_point_range_needs_closed_ends(
    point in any::<u8>(),
    can_take_min in any::<bool>(),
    can_take_max in any::<bool>()
  ) {
    let result = RangeAdaptor::with_bounds(
      point, point, can_take_min, can_take_max, ascii(AdaptPolicy::AlwaysAdapt)
    );
    prop_assert_eq!(result.is_ok(), can_take_min && can_take_max);
  }

  #[test]
  fn prop_range_membership_matches_source(
    a in any::<u8>(),
    b in any::<u8>(),
    can_take_min in any::<bool>(),
    can_take_max in any::<bool>(),
    candidate in arb_candidate()
  ) {
    let (low, high) = (a.min(b), a.max(b));
    prop_assume!(low < high || (can_take_min && can_take_max));

    let range =
      RangeAdaptor::with_bounds(low, high, can_take_min, can_take_max, ascii(AdaptPolicy::AlwaysAdapt))
        .unwrap();

    let expected = match u8::try_from(candidate) {
      Ok(source) => {
        let above = if can_take_min { source >= low } else { source > low };
        let below = if can_take_max { source <= high } else { source < high };
        above && below
      }
      Err(_) => false,
    };
    prop_assert_eq!(range.test(&candidate), expected);
  }

  #[test]
  fn prop_wide_range_membership_matches_source(
    a in any::<u32>(),
    b in any::<u32>(),
    candidate in any::<u64>()
  ) {
    let (low, high) = (a.min(b), a.max(b));
    let range =
      RangeAdaptor::new(low, high, AdaptContext::<u32, u64>::widening(AdaptPolicy::AlwaysAdapt))
        .unwrap();

    let expected = candidate >= u64::from(low) && candidate <= u64::from(high);
    prop_assert_eq!(range.test(&candidate), expected);
  }

  #[test]
  fn prop_constant_matches_only_itself(
    value in any::<u8>(),
    candidate in arb_candidate(),
    policy in arb_policy()
  ) {
    let constant = ConstAdaptor::new(value, ascii(policy)).unwrap();

    prop_assert_eq!(constant.value().unwrap(), char::from(value));
    prop_assert_eq!(constant.test(&candidate), candidate == char::from(value));
  }

  #[test]
  fn prop_add_then_contains(
    initial in prop::collection::vec(any::<u8>(), 0..16),
    candidate in arb_candidate()
  ) {
    let mut set = SetAdaptor::from_source(initial, ascii(AdaptPolicy::AlwaysAdapt));
    let was_present = set.contains(&candidate);
    let added = set.add(&candidate);

    match u8::try_from(candidate) {
      Ok(_) => {
        prop_assert_eq!(added, !was_present);
        prop_assert!(set.contains(&candidate));
      }
      Err(_) => {
        prop_assert!(!added);
        prop_assert!(!set.contains(&candidate));
      }
    }
  }

  #[test]
  fn prop_self_operand(elements in prop::collection::vec(any::<u8>(), 0..16)) {
    let expected: HashSet<u8> = elements.iter().cloned().collect();

    let mut set = SetAdaptor::from_source(elements.clone(), ascii(AdaptPolicy::AlwaysAdapt));
    set.union_with(Operand::itself());
    prop_assert_eq!(set.source_set(), &expected);
    set.intersect_with(Operand::itself());
    prop_assert_eq!(set.source_set(), &expected);
    prop_assert!(set.set_equals(Operand::itself()));

    let mut except = SetAdaptor::from_source(elements.clone(), ascii(AdaptPolicy::AlwaysAdapt));
    except.except_with(Operand::itself());
    prop_assert!(except.is_empty());

    let mut symmetric = SetAdaptor::from_source(elements, ascii(AdaptPolicy::AlwaysAdapt));
    symmetric.symmetric_except_with(Operand::itself());
    prop_assert!(symmetric.is_empty());
  }

  #[test]
  fn prop_union_matches_source_union(
    left in prop::collection::vec(any::<u8>(), 0..16),
    right in prop::collection::vec(arb_candidate(), 0..16)
  ) {
    let mut expected: HashSet<u8> = left.iter().cloned().collect();
    expected.extend(right.iter().filter_map(| c | u8::try_from(*c).ok()));

    let mut set = SetAdaptor::from_source(left, ascii(AdaptPolicy::AlwaysAdapt));
    set.union_with(Operand::Items(right.clone()));

    prop_assert_eq!(set.source_set(), &expected);
    prop_assert!(set.is_superset_of(Operand::Items(right)));
  }

  #[test]
  fn prop_captures_close_lifo(starts in prop::collection::vec(0usize..1_000, 1..12)) {
    let mut starts = starts;
    starts.sort();
    let last = *starts.last().unwrap();

    let mut service: CaptureService<u8, usize> = CaptureService::new();
    for (instance, start) in starts.iter().enumerate() {
      service.start_capture(start, 0, instance);
    }

    let mut cursor = last;
    for (instance, start) in starts.iter().enumerate().rev() {
      let capture = service.finish_capture(&cursor, &0).unwrap();
      prop_assert_eq!(capture.instance, instance);
      prop_assert_eq!(capture.start, *start);
      prop_assert_eq!(capture.length, cursor - start + 1);
      cursor += 1;
    }

    prop_assert!(service.is_idle());
    prop_assert!(service.finish_capture(&cursor, &0).is_err());
  }
}
