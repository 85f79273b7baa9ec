//! Reference board scenarios
//!
//! LED1 = PC3, LED2 = PD6 (outputs), BUTTON1 = PA2, BUTTON2 = PB4 (inputs).

#![cfg(all(feature = "dev-error-detect", feature = "flip-channel-api"))]

use dio_core::config::board::{self, BUTTON1, BUTTON2, LED1, LED2};
use dio_core::{Dio, Level, PortId, PortRegisters, RecordingSink};
use dio_hal::SimulatedPorts;
use dio_hal_atmega32::{parse_pin, Atmega32Ports, RegisterBlock};

/// Port driver setup done before the DIO driver is initialized
fn board_ports() -> SimulatedPorts {
    let mut ports = SimulatedPorts::new();
    ports.set_pin_direction(PortId::A, 2, false);
    ports.set_pin_direction(PortId::B, 4, false);
    ports.set_pin_direction(PortId::C, 3, true);
    ports.set_pin_direction(PortId::D, 6, true);
    ports
}

#[test]
fn board_table_matches_pin_names() {
    let names = ["PC3", "PD6", "PA2", "PB4"];
    let table = board::table();
    assert_eq!(table.len(), names.len());

    for (ch, name) in table.iter().zip(names) {
        assert_eq!(parse_pin(name), Some((ch.port(), ch.pin())));
    }
}

#[test]
fn write_sets_only_led1_bit() {
    let mut dio = Dio::new(board_ports(), RecordingSink::<4>::new());
    dio.init(Some(board::table()));
    let before = dio.registers().snapshot_all();

    dio.write_channel(LED1, Level::High);

    let after = dio.registers().snapshot_all();
    for port in PortId::ALL {
        let i = port.index() as usize;
        if port == PortId::C {
            assert_eq!(after[i].output, before[i].output | 0b0000_1000);
            assert_eq!(after[i].direction, before[i].direction);
        } else {
            assert_eq!(after[i], before[i]);
        }
    }
    assert_eq!(dio.sink().count(), 0);
}

#[test]
fn read_button_reflects_porta_bit2() {
    let mut dio = Dio::new(board_ports(), RecordingSink::<4>::new());
    dio.init(Some(board::table()));

    for value in 0..=u8::MAX {
        dio.registers_mut().set_external(PortId::A, value);
        let expected = Level::from(value & 0b0000_0100 != 0);
        assert_eq!(dio.read_channel(BUTTON1), expected);
    }
}

#[test]
fn buttons_switch_leds() {
    let mut dio = Dio::new(board_ports(), RecordingSink::<4>::new());
    dio.init(Some(board::table()));

    // First button: both LEDs on
    dio.registers_mut().set_external_pin(PortId::A, 2, Level::High);
    if dio.read_channel(BUTTON1) == Level::High {
        dio.write_channel(LED1, Level::High);
        dio.write_channel(LED2, Level::High);
    }
    assert_eq!(dio.read_channel(LED1), Level::High);
    assert_eq!(dio.read_channel(LED2), Level::High);

    // Second button: both LEDs off
    dio.registers_mut().set_external_pin(PortId::B, 4, Level::High);
    if dio.read_channel(BUTTON2) == Level::High {
        dio.write_channel(LED1, Level::Low);
        dio.write_channel(LED2, Level::Low);
    }
    assert_eq!(dio.read_channel(LED1), Level::Low);
    assert_eq!(dio.read_channel(LED2), Level::Low);
    assert_eq!(dio.sink().count(), 0);
}

#[test]
fn buttons_flip_leds() {
    let mut dio = Dio::new(board_ports(), RecordingSink::<4>::new());
    dio.init(Some(board::table()));

    assert_eq!(dio.flip_channel(LED1), Level::High);
    assert_eq!(dio.flip_channel(LED2), Level::High);
    assert_eq!(dio.registers().snapshot(PortId::C).output, 0b0000_1000);
    assert_eq!(dio.registers().snapshot(PortId::D).output, 0b0100_0000);

    assert_eq!(dio.flip_channel(LED1), Level::Low);
    assert_eq!(dio.flip_channel(LED2), Level::Low);
    assert_eq!(dio.registers().snapshot(PortId::C).output, 0);
    assert_eq!(dio.registers().snapshot(PortId::D).output, 0);
}

#[test]
fn led_follows_port_a_button_bit() {
    let mut dio = Dio::new(board_ports(), RecordingSink::<4>::new());
    dio.init(Some(board::table()));

    for pressed in [false, true, false] {
        dio.registers_mut()
            .set_external_pin(PortId::A, 2, Level::from(pressed));
        let level = Level::from((dio.read_port(PortId::A.index()) >> 2) & 1 != 0);
        dio.write_channel(LED1, level);
        assert_eq!(dio.read_channel(LED1), Level::from(pressed));
    }
    assert_eq!(dio.sink().count(), 0);
}

#[test]
fn scenario_on_atmega32_register_file() {
    let mut io = [0u8; 0x20];
    let ddrc = RegisterBlock::of(PortId::C).direction;
    let portc = RegisterBlock::of(PortId::C).output;
    let pina = RegisterBlock::of(PortId::A).input;
    io[ddrc] = 0b0000_1000;
    io[pina] = 0b0000_0100;

    {
        let ports = unsafe { Atmega32Ports::from_io_base(io.as_mut_ptr()) };
        let mut dio = Dio::new(ports, RecordingSink::<4>::new());
        dio.init(Some(board::table()));

        dio.write_channel(LED1, Level::High);
        assert_eq!(dio.read_channel(BUTTON1), Level::High);
        assert_eq!(dio.registers().read_output(PortId::C), 0b0000_1000);
        assert_eq!(dio.sink().count(), 0);
    }

    assert_eq!(io[portc], 0b0000_1000);
    let touched: Vec<usize> = (0..io.len()).filter(|&i| io[i] != 0).collect();
    assert_eq!(touched, vec![ddrc, portc, pina]);
}
