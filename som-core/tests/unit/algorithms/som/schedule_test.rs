use super::*;

#[test]
fn can_keep_initial_rate_in_first_iterations() {
    let mut schedule = LearningSchedule::new(0.7, 0.07, 150);

    assert_eq!(schedule.current(), 0.7);
    assert_eq!(schedule.advance(0), 0.7);
    assert_float_eq!(schedule.advance(1), 0.7 * (1. - 1. / 150.));
}

#[test]
fn can_decay_rate_to_floor() {
    let total = 150;
    let mut schedule = LearningSchedule::new(0.7, 0.07, total);

    let rates = (0..total).map(|iteration| schedule.advance(iteration)).collect::<Vec<_>>();

    assert!(rates.windows(2).all(|pair| pair[1] <= pair[0]));
    assert!(rates.iter().all(|&rate| (0.07..=0.7).contains(&rate)));
    assert_eq!(*rates.last().unwrap(), 0.07);
    assert_eq!(schedule.rate_at(total), 0.07);
}

#[test]
fn can_leave_rate_unchanged_after_last_iteration() {
    let mut schedule = LearningSchedule::new(0.7, 0.0, 10);
    (0..9).for_each(|iteration| {
        schedule.advance(iteration);
    });
    let before = schedule.current();

    assert_eq!(schedule.advance(9), before);
}

#[test]
fn can_create_learning_schedule_from_config() {
    let config = TrainingConfig { initial_learning_rate: 0.5, final_learning_rate: 0.1, ..TrainingConfig::default() };

    let schedule = LearningSchedule::from_config(&config, 10);

    assert_eq!(schedule.current(), 0.5);
    assert_float_eq!(schedule.rate_at(5), 0.25);
    assert_eq!(schedule.rate_at(9), 0.1);
}

parameterized_test! {can_get_radius, (total, iteration, expected), {
    let schedule = RadiusSchedule::new([3, 2, 1], 0.2, total);

    assert_eq!(schedule.radius_at(iteration), expected);
}}

can_get_radius! {
    case01_first: (150, 0, 3),
    case02_first_third_end: (150, 9, 3),
    case03_second_third: (150, 10, 2),
    case04_second_third_end: (150, 19, 2),
    case05_last_third: (150, 20, 1),
    case06_tuning: (150, 30, 1),
    case07_last: (150, 149, 1),
    case08_small_first: (20, 0, 3),
    case09_small_second: (20, 1, 2),
    case10_small_last: (20, 2, 1),
    case11_tiny: (4, 0, 1),
}

#[test]
fn can_calculate_ordering_iterations() {
    assert_eq!(RadiusSchedule::new([3, 2, 1], 0.2, 150).ordering_iterations(), 30);
    assert_eq!(RadiusSchedule::from_config(&TrainingConfig::default(), 20).ordering_iterations(), 4);
}
