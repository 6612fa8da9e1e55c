use super::*;

#[test]
fn can_use_parallel_collect() {
    let source = (0..100).collect::<Vec<i32>>();

    let result = parallel_collect(source.as_slice(), |item| item * 2);

    assert_eq!(result, (0..100).map(|item| item * 2).collect::<Vec<_>>());
}

#[test]
fn can_use_parallel_try_foreach_mut() {
    let mut source = vec![1, 2, 3];

    let result: Result<(), String> = parallel_try_foreach_mut(source.as_mut_slice(), |item| {
        *item *= 10;
        Ok(())
    });

    assert_eq!(result, Ok(()));
    assert_eq!(source, vec![10, 20, 30]);
}

#[test]
fn can_propagate_error_from_parallel_try_foreach_mut() {
    let mut source = (0..1000).collect::<Vec<i32>>();

    let result = parallel_try_foreach_mut(source.as_mut_slice(), |item| if *item == 500 { Err("failed") } else { Ok(()) });

    assert_eq!(result, Err("failed"));
}
