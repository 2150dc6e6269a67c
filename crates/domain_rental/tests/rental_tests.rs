//! Tests for rental agreement drafting

use domain_rental::rental::display_name;
use domain_rental::{Contact, NewRentalAgreement};
use proptest::prelude::*;
use test_utils::{rental_period_strategy, DateFixtures, RecordFixtures, VehicleBuilder};

#[test]
fn test_display_name_for_reference_pair() {
    let vehicle = RecordFixtures::camry();
    let contact = RecordFixtures::jane_doe();
    assert_eq!(display_name(&vehicle, &contact), "Toyota Camry 2022 - Jane Doe");
}

#[test]
fn test_display_name_with_unnamed_contact() {
    let vehicle = VehicleBuilder::new()
        .with_make_model_year("Ford", "Focus", 2019)
        .build();
    let contact = Contact {
        id: "7".into(),
        first_name: None,
        last_name: Some("Nguyen".to_string()),
    };
    assert_eq!(display_name(&vehicle, &contact), "Ford Focus 2019 -  Nguyen");
}

#[test]
fn test_draft_takes_price_from_vehicle() {
    let vehicle = RecordFixtures::camry();
    let draft = NewRentalAgreement::draft(
        &vehicle,
        &RecordFixtures::jane_doe(),
        DateFixtures::four_day_period(),
        false,
    );
    assert_eq!(draft.cost_per_day, vehicle.daily_price);
    assert_eq!(draft.start_date(), DateFixtures::jan_1_2024());
    assert_eq!(draft.end_date(), DateFixtures::jan_5_2024());
}

proptest! {
    #[test]
    fn prop_draft_total_days_is_never_negative(period in rental_period_strategy()) {
        let draft = NewRentalAgreement::draft(
            &RecordFixtures::camry(),
            &RecordFixtures::jane_doe(),
            period,
            true,
        );
        prop_assert!(draft.total_days >= 0);
        prop_assert_eq!(draft.total_days, (period.end - period.start).num_days());
    }
}
