//! End-to-end: console frames → channel host link → controller → status lines.

use std::thread;
use std::time::Duration;

use printctl::adapters::host_link::{ChannelHostLink, FrameChannel, HostFrame, StatusChannel};
use printctl::app::ports::NullSink;
use printctl::config::PrinterConfig;
use printctl::controller::Controller;
use printctl::job::JobOutcome;
use printctl::lines::{DigitalLine, Level};
use printctl::signal::{CancelFlag, PollBudget};

use crate::mock_hw::MockHardware;

fn feed(inbound: &FrameChannel<32>, lines: &[&str]) {
    for l in lines {
        inbound
            .try_send(HostFrame::from_console_line(l))
            .expect("inbound channel has room");
    }
}

fn drain(outbound: &StatusChannel<8>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(s) = outbound.try_receive() {
        out.push(s.as_str().to_owned());
    }
    out
}

#[test]
fn console_job_prints_each_line() {
    let inbound = FrameChannel::<32>::new();
    let outbound = StatusChannel::<8>::new();
    feed(&inbound, &["JOB", "first", "second", "third", "END"]);

    let link = ChannelHostLink::new(&inbound, &outbound);
    let mut c = Controller::new(PrinterConfig::default(), MockHardware::ready(), link, NullSink);
    c.init();

    assert_eq!(c.poll_once(), Some(JobOutcome::Completed { cycles: 3 }));
    assert_eq!(drain(&outbound), ["Printing started.", "Printing completed."]);
    assert_eq!(
        c.hardware().transitions(DigitalLine::PrintHeadMotor),
        [false, true, false, true, false, true, false]
    );
}

#[test]
fn back_to_back_jobs_over_the_link() {
    let inbound = FrameChannel::<32>::new();
    let outbound = StatusChannel::<8>::new();
    feed(&inbound, &["JOB", "a", "END", "JOB", "END"]);

    let link = ChannelHostLink::new(&inbound, &outbound);
    let mut c = Controller::new(PrinterConfig::default(), MockHardware::ready(), link, NullSink);
    c.init();

    let summary = c.run(PollBudget::new(3));

    assert_eq!(summary.jobs_completed, 2);
    assert_eq!(
        drain(&outbound),
        [
            "Printing started.",
            "Printing completed.",
            "Printing started.",
            "Printing completed."
        ]
    );
}

#[test]
fn paper_fault_is_reported_over_the_link() {
    let inbound = FrameChannel::<32>::new();
    let outbound = StatusChannel::<8>::new();
    feed(&inbound, &["JOB", "a", "END"]);

    let link = ChannelHostLink::new(&inbound, &outbound);
    let mut c = Controller::new(
        PrinterConfig::default(),
        MockHardware::new(false, true),
        link,
        NullSink,
    );
    c.init();

    c.poll_once();

    assert_eq!(drain(&outbound), ["Error: No paper loaded."]);
    // The aborted job's data is left behind and discarded on the next poll.
    assert_eq!(c.poll_once(), None);
    assert!(inbound.is_empty());
}

#[test]
fn cycle_limit_leftovers_are_discarded_on_next_poll() {
    let inbound = FrameChannel::<32>::new();
    let outbound = StatusChannel::<8>::new();
    feed(&inbound, &["JOB", "a", "b", "c", "d", "END"]);

    let config = PrinterConfig {
        max_cycles: Some(2),
        ..PrinterConfig::default()
    };
    let link = ChannelHostLink::new(&inbound, &outbound);
    let mut c = Controller::new(config, MockHardware::ready(), link, NullSink);
    c.init();

    assert_eq!(
        c.poll_once(),
        Some(JobOutcome::CycleLimitReached { cycles: 2 })
    );
    assert_eq!(
        drain(&outbound),
        ["Printing started.", "Error: Print cycle limit reached."]
    );
    assert_eq!(c.poll_once(), None);
    assert!(inbound.is_empty());
}

#[test]
fn cancel_releases_a_job_whose_host_went_quiet() {
    let inbound = FrameChannel::<32>::new();
    let outbound = StatusChannel::<8>::new();
    let cancel = CancelFlag::new();
    // No END: the link blocks waiting for the next frame.
    feed(&inbound, &["JOB", "first"]);

    let (outcome, hw) = thread::scope(|s| {
        let job = s.spawn(|| {
            let link = ChannelHostLink::new(&inbound, &outbound).with_cancel(&cancel);
            let mut c = Controller::new(
                PrinterConfig::default(),
                MockHardware::ready(),
                link,
                NullSink,
            )
            .with_cancel(&cancel);
            c.init();
            let outcome = c.poll_once();
            (outcome, c.into_parts().0)
        });

        // Cancel only once printing is under way, so the request is not
        // discarded as stale at job start.
        loop {
            if let Ok(status) = outbound.try_receive() {
                assert_eq!(status.as_str(), "Printing started.");
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        thread::sleep(Duration::from_millis(50));
        cancel.cancel();
        job.join().expect("job thread panicked")
    });

    assert!(matches!(outcome, Some(JobOutcome::Cancelled { .. })));
    assert_eq!(drain(&outbound), ["Printing cancelled."]);
    assert_eq!(hw.last_level(DigitalLine::PaperFeedMotor), Some(Level::Low));
    assert!(!cancel.is_raised());
}
