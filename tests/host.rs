extern crate hci_config as hci;

mod mock;

use hci::event::Error as EventError;
use hci::host::{Error, Hci};
use hci::opcode;
use hci::types::{ClassOfDevice, LocalName, PageTimeout, ScanActivity, Slots};
use hci::transport::Controller;
use hci::Status;
use mock::{command_complete, command_packet, command_status, RecordingSink};
use std::io;
use std::time::{Duration, Instant};

const TIMEOUT: Duration = Duration::from_millis(20);

fn sink_with(events: Vec<Vec<u8>>) -> RecordingSink {
    let sink = RecordingSink::new();
    sink.link().borrow_mut().events.extend(events);
    sink
}

fn written(sink: &RecordingSink) -> Vec<Vec<u8>> {
    sink.link().borrow().written.clone()
}

#[test]
fn command_packet_layout() {
    let mut sink = sink_with(vec![command_complete(opcode::READ_LOCAL_NAME, &[0; 249])]);
    sink.read_local_name(TIMEOUT).unwrap();
    assert_eq!(written(&sink), [vec![1, 0x14, 0x0C, 0]]);
}

#[test]
fn read_local_name() {
    let mut params = vec![0; 249];
    params[1..5].copy_from_slice(b"Test");
    let mut sink = sink_with(vec![command_complete(opcode::READ_LOCAL_NAME, &params)]);

    let name = sink.read_local_name(TIMEOUT).unwrap();
    assert_eq!(name.as_str(), "Test");
}

#[test]
fn change_local_name_pads_field() {
    let mut sink = sink_with(vec![command_complete(opcode::CHANGE_LOCAL_NAME, &[0])]);
    sink.change_local_name(&LocalName::new("box").unwrap(), TIMEOUT)
        .unwrap();

    let packets = written(&sink);
    assert_eq!(packets.len(), 1);
    assert_eq!(&packets[0][..4], &[1, 0x13, 0x0C, 248]);
    assert_eq!(&packets[0][4..7], b"box");
    assert!(packets[0][7..].iter().all(|&b| b == 0));
    assert_eq!(packets[0].len(), 4 + 248);
}

#[test]
fn class_of_device_write_then_read() {
    let class = ClassOfDevice::parse("1F00").unwrap();
    let mut sink = sink_with(vec![
        command_complete(opcode::WRITE_CLASS_OF_DEVICE, &[0]),
        command_complete(opcode::READ_CLASS_OF_DEVICE, &[0, 0x00, 0x1F, 0x00]),
    ]);

    sink.write_class_of_device(class, TIMEOUT).unwrap();
    assert_eq!(
        written(&sink)[0],
        command_packet(opcode::WRITE_CLASS_OF_DEVICE, &[0x00, 0x1F, 0x00])
    );

    let read = sink.read_class_of_device(TIMEOUT).unwrap();
    assert_eq!(read.value(), 0x001f00);
    assert_eq!(read, class);
}

#[test]
fn scan_activity_is_sent_interval_first() {
    let activity = ScanActivity::parse("18:2048").unwrap();
    let mut sink = sink_with(vec![command_complete(
        opcode::WRITE_INQUIRY_SCAN_ACTIVITY,
        &[0],
    )]);

    sink.write_inquiry_scan_activity(activity, TIMEOUT).unwrap();
    assert_eq!(
        written(&sink)[0],
        [1, 0x1E, 0x0C, 4, 0x00, 0x08, 0x12, 0x00]
    );
}

#[test]
fn read_page_scan_activity() {
    let mut sink = sink_with(vec![command_complete(
        opcode::READ_PAGE_SCAN_ACTIVITY,
        &[0, 0x00, 0x08, 0x12, 0x00],
    )]);

    let activity = sink.read_page_scan_activity(TIMEOUT).unwrap();
    assert_eq!(activity.interval, Slots(0x0800));
    assert_eq!(activity.window, Slots(0x0012));
}

#[test]
fn page_timeout_round_trip() {
    let mut sink = sink_with(vec![
        command_complete(opcode::WRITE_PAGE_TIMEOUT, &[0]),
        command_complete(opcode::READ_PAGE_TIMEOUT, &[0, 0x00, 0x20]),
    ]);

    sink.write_page_timeout(PageTimeout(Slots(0x2000)), TIMEOUT)
        .unwrap();
    assert_eq!(written(&sink)[0], [1, 0x18, 0x0C, 2, 0x00, 0x20]);
    assert_eq!(
        sink.read_page_timeout(TIMEOUT).unwrap(),
        PageTimeout(Slots(0x2000))
    );
}

#[test]
fn read_local_version_information() {
    let mut sink = sink_with(vec![command_complete(
        opcode::LOCAL_VERSION_INFO,
        &[0, 0x03, 0x34, 0x12, 0x03, 0x0A, 0x00, 0x78, 0x56],
    )]);

    let version = sink.read_local_version_information(TIMEOUT).unwrap();
    assert_eq!(written(&sink), [vec![1, 0x01, 0x10, 0]]);
    assert_eq!(version.hci_version, 3);
    assert_eq!(version.hci_revision, 0x1234);
    assert_eq!(version.lmp_version, 3);
    assert_eq!(version.manufacturer_name, 10);
    assert_eq!(version.lmp_subversion, 0x5678);
}

#[test]
fn read_vendor_revision() {
    let mut sink = sink_with(vec![command_complete(
        opcode::VENDOR_REVISION,
        b"\x00Build 1958\x00\x00\x00",
    )]);

    assert_eq!(sink.read_vendor_revision(TIMEOUT).unwrap(), "Build 1958");
    assert_eq!(written(&sink), [vec![1, 0x0F, 0xFC, 0]]);
}

#[test]
fn failure_status_is_not_decoded() {
    // A truncated payload would be a length error if it were decoded.
    let mut sink = sink_with(vec![command_complete(opcode::READ_LOCAL_NAME, &[0x12])]);

    match sink.read_local_name(TIMEOUT) {
        Err(e @ Error::Event(EventError::CommandFailed(Status(0x12)))) => {
            assert_eq!(e.status(), Some(Status(0x12)))
        }
        other => panic!("Did not get failure status: {:?}", other),
    }
}

#[test]
fn write_checks_status() {
    let mut sink = sink_with(vec![command_complete(opcode::WRITE_CLASS_OF_DEVICE, &[0x0C])]);

    let err = sink
        .write_class_of_device(ClassOfDevice::new(0x5a020c).unwrap(), TIMEOUT)
        .err()
        .unwrap();
    assert_eq!(err.status(), Some(Status(0x0C)));
}

#[test]
fn failed_command_status_ends_exchange() {
    let mut sink = sink_with(vec![command_status(0x01, opcode::VENDOR_REVISION)]);

    let err = sink.read_vendor_revision(TIMEOUT).err().unwrap();
    assert_eq!(err.status(), Some(Status(0x01)));
}

#[test]
fn skips_events_for_other_commands() {
    let mut sink = sink_with(vec![
        // Pending status for the same command
        command_status(0x00, opcode::READ_PAGE_TIMEOUT),
        // Another command completing
        command_complete(opcode::READ_LOCAL_NAME, &[0; 249]),
        // Disconnection Complete
        vec![0x04, 0x05, 4, 0x00, 0x01, 0x00, 0x13],
        command_complete(opcode::READ_PAGE_TIMEOUT, &[0, 0x01, 0x00]),
    ]);

    assert_eq!(
        sink.read_page_timeout(TIMEOUT).unwrap(),
        PageTimeout(Slots(1))
    );
    assert!(sink.link().borrow().events.is_empty());
}

#[test]
fn times_out_without_answer() {
    let mut sink = RecordingSink::new();

    match sink.read_class_of_device(Duration::from_millis(5)) {
        Err(Error::Timeout(bound)) => assert_eq!(bound, Duration::from_millis(5)),
        other => panic!("Did not time out: {:?}", other),
    }
    assert_eq!(written(&sink).len(), 1);
}

#[test]
fn rejects_non_event_packets() {
    let mut sink = sink_with(vec![vec![0x02, 0x01, 0x20, 0x00, 0x00]]);

    match sink.read_local_name(TIMEOUT) {
        Err(Error::Event(EventError::BadPacketType(0x02))) => (),
        other => panic!("Did not get bad packet type: {:?}", other),
    }
}

#[test]
fn rejects_truncated_return_parameters() {
    let mut sink = sink_with(vec![command_complete(
        opcode::READ_CLASS_OF_DEVICE,
        &[0, 0x01],
    )]);

    match sink.read_class_of_device(TIMEOUT) {
        Err(Error::Event(EventError::BadLength(1, 3))) => (),
        other => panic!("Did not get bad length: {:?}", other),
    }
}

/// A controller busy with someone else's commands: every read yields a Command Complete for Read
/// Local Name, one per millisecond, until `chatter` runs out, then the expected reply.
struct BusyController {
    chatter: usize,
    reads: usize,
    reply: Vec<u8>,
}

impl Controller for BusyController {
    type Error = io::Error;

    fn write(&mut self, _header: &[u8], _payload: &[u8]) -> nb::Result<(), io::Error> {
        Ok(())
    }

    fn read_into(&mut self, buffer: &mut [u8]) -> nb::Result<usize, io::Error> {
        std::thread::sleep(Duration::from_millis(1));
        self.reads += 1;

        let packet = if self.reads <= self.chatter {
            command_complete(opcode::READ_LOCAL_NAME, &[0; 249])
        } else {
            self.reply.clone()
        };
        buffer[..packet.len()].copy_from_slice(&packet);
        Ok(packet.len())
    }
}

#[test]
fn unrelated_traffic_does_not_extend_timeout() {
    let mut controller = BusyController {
        chatter: 2000,
        reads: 0,
        reply: command_complete(opcode::READ_PAGE_TIMEOUT, &[0, 0x01, 0x00]),
    };

    let start = Instant::now();
    match controller.read_page_timeout(Duration::from_millis(30)) {
        Err(Error::Timeout(bound)) => assert_eq!(bound, Duration::from_millis(30)),
        other => panic!("Did not time out: {:?}", other),
    }
    assert!(start.elapsed() < Duration::from_millis(1000));
    assert!(controller.reads < 2000);
}

#[test]
fn skips_malformed_events_for_other_commands() {
    let mut sink = sink_with(vec![
        // Command Status for Read Local Name with one byte too many
        vec![0x04, 0x0F, 5, 0x00, 0x01, 0x14, 0x0C, 0xff],
        command_complete(opcode::READ_PAGE_TIMEOUT, &[0, 0x01, 0x00]),
    ]);

    assert_eq!(
        sink.read_page_timeout(TIMEOUT).unwrap(),
        PageTimeout(Slots(1))
    );
}

#[test]
fn malformed_event_for_pending_command_ends_exchange() {
    let mut sink = sink_with(vec![vec![0x04, 0x0F, 5, 0x00, 0x01, 0x17, 0x0C, 0xff]]);

    match sink.read_page_timeout(TIMEOUT) {
        Err(Error::Event(EventError::BadLength(5, 4))) => (),
        other => panic!("Did not get bad length: {:?}", other),
    }
}

#[test]
fn peek_opcode_of_raw_events() {
    let complete = command_complete(opcode::READ_CLASS_OF_DEVICE, &[0]);
    let status = command_status(0x00, opcode::WRITE_PAGE_TIMEOUT);

    assert_eq!(
        hci::event::peek_opcode(&complete),
        Some(opcode::READ_CLASS_OF_DEVICE)
    );
    assert_eq!(
        hci::event::peek_opcode(&status),
        Some(opcode::WRITE_PAGE_TIMEOUT)
    );
    assert_eq!(hci::event::peek_opcode(&[0x04, 0x0F, 4, 0x00]), None);
    assert_eq!(hci::event::peek_opcode(&[0x04, 0x05, 4, 0, 1, 0, 0x13]), None);
}

#[test]
fn only_zero_status_is_success() {
    assert!(Status::SUCCESS.is_success());
    assert!(Status(0x00).is_success());
    assert!(!Status(0x0C).is_success());
}
