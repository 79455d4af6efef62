use std::{cell::RefCell, rc::Rc};

use evsched::{
    driver,
    time::Time,
    units::{Microsecs, Millisecs, Nanosecs},
    Config, EventSchedule, ScheduleError,
};

#[derive(Debug, Default)]
struct Link {
    delivered: Vec<(u32, Time)>,
}

// Sends `count` packets spaced one microsecond apart, each delivered after a fixed propagation
// delay. Deliveries that share an arrival time must keep their send order.
fn send_burst(link: &Rc<RefCell<Link>>, count: u32) -> impl FnOnce(&mut EventSchedule) + 'static {
    let link = Rc::clone(link);
    move |sched: &mut EventSchedule| {
        for seq in 0..count {
            let link = Rc::clone(&link);
            let delay = Microsecs::new(u64::from(seq)).into_delta() + Nanosecs::new(500).into_delta();
            sched.enqueue_after(delay, move |sched: &mut EventSchedule| {
                link.borrow_mut().delivered.push((seq, sched.current_time()));
            });
        }
    }
}

#[test]
fn bursts_deliver_in_time_order() {
    let link = Rc::new(RefCell::new(Link::default()));
    let mut sched = EventSchedule::new();
    sched.enqueue(Microsecs::new(10).into_time(), send_burst(&link, 3));
    sched.enqueue(Microsecs::new(11).into_time(), send_burst(&link, 2));

    let summary = driver::run(&mut sched, &Config::default());
    assert!(summary.drained);
    assert_eq!(summary.events, 7);

    let delivered = &link.borrow().delivered;
    let times = delivered.iter().map(|&(_, t)| t).collect::<Vec<_>>();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    // The second packet of the first burst and the first packet of the second burst arrive
    // together, in the order they were scheduled.
    assert_eq!(delivered[1], (1, Time::new(11_500)));
    assert_eq!(delivered[2], (0, Time::new(11_500)));
}

#[test]
fn checked_api_propagates_errors() -> anyhow::Result<()> {
    let mut sched = EventSchedule::starting_at(Millisecs::new(1).into_time());
    sched.try_enqueue(Millisecs::new(2).into_time(), |_| {})?;
    assert_eq!(sched.try_advance_and_fire()?, 1);

    let err = sched
        .try_enqueue(Millisecs::new(1).into_time(), |_| {})
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NotInFuture { .. }));
    assert!(err.to_string().contains("2000000"));
    Ok(())
}

#[test]
fn config_file_round_trip() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("evsched-config-{}.json", std::process::id()));
    let cfg = Config::builder().timeout(Nanosecs::new(750)).build();
    std::fs::write(&path, serde_json::to_string(&cfg)?)?;
    let read = driver::read_config(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(read.timeout, Some(Nanosecs::new(750)));

    assert!(matches!(
        driver::read_config(&path),
        Err(driver::Error::Io(_))
    ));
    Ok(())
}
