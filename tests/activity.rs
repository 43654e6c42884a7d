#[cfg(test)]
mod tests {
    use vigil::libs::activity::{ActivityCode, ActivitySet};

    #[test]
    fn test_all_known_codes_are_activity() {
        let set = ActivitySet::all();
        for code in ActivityCode::ALL {
            assert!(set.contains(code), "{:?} should be in the full set", code);
            assert!(set.is_activity(code), "{:?} should classify as activity", code);
        }
        assert_eq!(set.len(), ActivityCode::ALL.len());
    }

    #[test]
    fn test_pointer_move_is_always_activity() {
        // Pointer move is the distinguished fast-path code: it classifies as
        // activity even when the configured set does not contain it.
        let set = ActivitySet::from_codes(&[ActivityCode::KeyDown]).unwrap();
        assert!(!set.contains(ActivityCode::PointerMove));
        assert!(set.is_activity(ActivityCode::PointerMove));
    }

    #[test]
    fn test_non_member_codes_are_not_activity() {
        let set = ActivitySet::from_codes(&[ActivityCode::KeyDown, ActivityCode::ButtonDown]).unwrap();
        assert!(set.is_activity(ActivityCode::KeyDown));
        assert!(set.is_activity(ActivityCode::ButtonDown));
        assert!(!set.is_activity(ActivityCode::KeyUp));
        assert!(!set.is_activity(ActivityCode::Wheel));
        assert!(!set.is_activity(ActivityCode::NcButtonDown));
    }

    #[test]
    fn test_empty_set_fails_fast() {
        assert!(ActivitySet::from_codes(&[]).is_err());
    }

    #[test]
    fn test_duplicate_codes_collapse() {
        let set = ActivitySet::from_codes(&[ActivityCode::KeyDown, ActivityCode::KeyDown]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_default_is_full_set() {
        assert_eq!(ActivitySet::default(), ActivitySet::all());
    }
}
