use nfcemu::record::date::PackedDate;
use proptest::prelude::*;

#[test]
fn reference_vector() {
    // 2014-11-21, the placeholder the module stamps on writeback.
    let date = PackedDate::pack(11, 21, 2014);
    assert_eq!(date.as_raw(), 0xAD8E);
    assert_eq!(PackedDate::from_raw(0xAD8E), date);
}

#[test]
fn epoch_boundaries() {
    let first = PackedDate::pack(1, 1, 2000);
    assert_eq!((first.month(), first.day(), first.year()), (1, 1, 2000));

    let last = PackedDate::pack(12, 31, 2127);
    assert_eq!((last.month(), last.day(), last.year()), (12, 31, 2127));
}

proptest! {
    // Round-trip over the full representable domain.
    #[test]
    fn roundtrip_over_domain(day in 1u8..=31, month in 1u8..=12, year in 2000u16..=2127) {
        let date = PackedDate::pack(month, day, year);
        prop_assert_eq!(date.day(), day);
        prop_assert_eq!(date.month(), month);
        prop_assert_eq!(date.year(), year);
    }

    // Raw values survive a decode/encode cycle of their defined fields.
    #[test]
    fn raw_fields_are_disjoint(raw in any::<u16>()) {
        let date = PackedDate::from_raw(raw);
        let repacked = PackedDate::pack(date.month(), date.day(), date.year());
        prop_assert_eq!(repacked.as_raw(), raw);
    }
}
