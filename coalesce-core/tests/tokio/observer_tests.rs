// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_core::{CoalesceError, Notification, Observer};

#[derive(Default)]
struct Counting {
    values: usize,
    errors: Vec<CoalesceError>,
    completed: bool,
}

impl Observer<u8> for Counting {
    fn on_next(&mut self, _value: u8) {
        self.values += 1;
    }

    fn on_error(&mut self, error: CoalesceError) {
        self.errors.push(error);
    }

    fn on_complete(&mut self) {
        self.completed = true;
    }
}

#[test]
fn test_closure_observer_sees_every_signal() {
    let mut seen = Vec::new();
    {
        let mut observer = |n: Notification<i32>| seen.push(n);
        observer.on_next(7);
        observer.on_error(CoalesceError::stream_error("boom"));
        observer.on_complete();
    }

    assert_eq!(
        seen,
        vec![
            Notification::Next(7),
            Notification::Error(CoalesceError::stream_error("boom")),
            Notification::Complete,
        ]
    );
}

#[test]
fn test_struct_observer_receives_the_terminal_error() {
    // Arrange
    let mut observer = Counting::default();

    // Act
    observer.notify(Notification::Next(1));
    observer.notify(Notification::Next(2));
    observer.notify(Notification::Error(CoalesceError::stream_error("window lost")));

    // Assert
    assert_eq!(observer.values, 2);
    assert_eq!(observer.errors.len(), 1);
    assert_eq!(
        observer.errors[0].to_string(),
        "Stream processing error: window lost"
    );
    assert!(!observer.completed);
}

#[test]
fn test_struct_observer_completes() {
    let mut observer = Counting::default();

    observer.notify(Notification::Next(1));
    observer.notify(Notification::Complete);

    assert_eq!(observer.values, 1);
    assert!(observer.errors.is_empty());
    assert!(observer.completed);
}
