//! Raw event codes and builders for the reports written to the evdev nodes.

use evdevil::event::{EventType, InputEvent};

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;
pub const SYN_REPORT: u16 = 0;

pub const BTN_TOOL_PEN: u16 = 0x140;
pub const BTN_TOOL_RUBBER: u16 = 0x141;
pub const BTN_TOUCH: u16 = 0x14a;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_PRESSURE: u16 = 0x18;
pub const ABS_DISTANCE: u16 = 0x19;
pub const ABS_TILT_X: u16 = 0x1a;
pub const ABS_TILT_Y: u16 = 0x1b;
pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;
pub const ABS_MT_TRACKING_ID: u16 = 0x39;

pub fn key_event(code: u16, value: i32) -> InputEvent {
    InputEvent::new(EventType::from_raw(EV_KEY), code, value)
}

pub fn abs_event(code: u16, value: i32) -> InputEvent {
    InputEvent::new(EventType::from_raw(EV_ABS), code, value)
}

/// The report marker that terminates every batch.
pub fn syn_report() -> InputEvent {
    InputEvent::new(EventType::from_raw(EV_SYN), SYN_REPORT, 0)
}

pub fn is_report(ev: &InputEvent) -> bool {
    ev.event_type().raw() == EV_SYN && ev.raw_code() == SYN_REPORT
}

/// Symbolic name for an event code, for logs and dumps.
pub fn code_name(ty: u16, code: u16) -> String {
    match (ty, code) {
        (EV_SYN, SYN_REPORT) => "SYN_REPORT".into(),
        (EV_KEY, BTN_TOOL_PEN) => "BTN_TOOL_PEN".into(),
        (EV_KEY, BTN_TOOL_RUBBER) => "BTN_TOOL_RUBBER".into(),
        (EV_KEY, BTN_TOUCH) => "BTN_TOUCH".into(),
        (EV_KEY, _) => format!("KEY/{}", code),
        (EV_ABS, _) => {
            let abs = match code {
                ABS_X => "X",
                ABS_Y => "Y",
                ABS_PRESSURE => "PRESSURE",
                ABS_DISTANCE => "DISTANCE",
                ABS_TILT_X => "TILT_X",
                ABS_TILT_Y => "TILT_Y",
                ABS_MT_POSITION_X => "MT_POSITION_X",
                ABS_MT_POSITION_Y => "MT_POSITION_Y",
                ABS_MT_TRACKING_ID => "MT_TRACKING_ID",
                _ => return format!("ABS/{}", code),
            };
            format!("ABS_{}", abs)
        }
        _ => format!("type{} code{}", ty, code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_carry_raw_fields() {
        let release = abs_event(ABS_MT_TRACKING_ID, -1);
        assert_eq!(release.event_type().raw(), EV_ABS);
        assert_eq!(release.raw_code(), ABS_MT_TRACKING_ID);
        assert_eq!(release.raw_value(), -1);

        let touch = key_event(BTN_TOUCH, 1);
        assert_eq!((touch.event_type().raw(), touch.raw_code(), touch.raw_value()), (EV_KEY, BTN_TOUCH, 1));

        let syn = syn_report();
        assert_eq!((syn.event_type().raw(), syn.raw_code(), syn.raw_value()), (EV_SYN, SYN_REPORT, 0));
    }

    #[test]
    fn test_report_marker() {
        assert!(is_report(&syn_report()));
        assert!(!is_report(&abs_event(ABS_X, 0)));
        assert!(!is_report(&key_event(BTN_TOUCH, 0)));
    }

    #[test]
    fn test_code_names() {
        assert_eq!(code_name(EV_ABS, ABS_MT_TRACKING_ID), "ABS_MT_TRACKING_ID");
        assert_eq!(code_name(EV_KEY, BTN_TOOL_RUBBER), "BTN_TOOL_RUBBER");
        assert_eq!(code_name(EV_ABS, 0x2f), "ABS/47");
    }
}
