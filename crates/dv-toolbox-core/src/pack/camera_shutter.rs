use arbitrary_int::{u1, u7, Number};
use bitbybit::bitfield;
use garde::Validate;
use serde::{Deserialize, Serialize};
use snafu::whatever;


/// Provides the shutter speed used by a camera to record the video.
///
/// DV standards:
///
/// - IEC 61834-4:1998 Section 10.2 - Camera Shutter (CAMERA)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Validate, Serialize, Deserialize)]
#[garde(context(super::PackContext))]
pub struct CameraShutter {
    /// Shutter speed, in units of 1/10000 second, as used by a consumer camera.
    #[garde(custom(check_shutter_speed_consumer))]
    pub shutter_speed_consumer: Option<u16>,

    /// Shutter speed, in units of the upper line of a 2-line exposure, as used by a
    /// professional camera.
    #[garde(custom(check_shutter_speed_professional_upper_line))]
    pub shutter_speed_professional_upper_line: Option<u8>,

    /// Shutter speed, in units of the lower line of a 2-line exposure, as used by a
    /// professional camera.
    #[garde(custom(check_shutter_speed_professional_lower_line))]
    pub shutter_speed_professional_lower_line: Option<u8>,
}

fn check_shutter_speed_consumer(
    shutter_speed_consumer: &Option<u16>,
    _ctx: &super::PackContext,
) -> garde::Result {
    match *shutter_speed_consumer {
        Some(value) if value > 0x7FFE => {
            Err(garde::Error::new("Consumer shutter speed is out of range."))
        }
        _ => Ok(()),
    }
}

fn check_shutter_speed_professional_upper_line(
    shutter_speed_professional_upper_line: &Option<u8>,
    _ctx: &super::PackContext,
) -> garde::Result {
    match *shutter_speed_professional_upper_line {
        Some(value) if value > 0xFE => {
            Err(garde::Error::new("Professional upper line shutter speed is out of range."))
        }
        _ => Ok(()),
    }
}

fn check_shutter_speed_professional_lower_line(
    shutter_speed_professional_lower_line: &Option<u8>,
    _ctx: &super::PackContext,
) -> garde::Result {
    match *shutter_speed_professional_lower_line {
        Some(value) if value > 0xFE => {
            Err(garde::Error::new("Professional lower line shutter speed is out of range."))
        }
        _ => Ok(()),
    }
}

#[bitfield(u32)]
struct RawCameraShutter {
    // PC1
    #[bits(0..=7, rw)]
    professional_upper_line: u8,

    // PC2
    #[bits(8..=15, rw)]
    professional_lower_line: u8,

    // PC3
    #[bits(16..=23, rw)]
    consumer_low: u8,

    // PC4
    #[bits(24..=30, rw)]
    consumer_high: u7,
    #[bit(31, rw)]
    reserved: u1,
}

impl super::PackData for CameraShutter {
    fn try_from_raw(
        raw: &super::RawPackData,
        _ctx: &super::PackContext,
    ) -> Result<Self, super::RawError> {
        let raw = RawCameraShutter::new_with_raw_value(u32::from_le_bytes(*raw));
        if raw.reserved() != u1::new(1) {
            whatever!("reserved bit of camera shutter pack must be set to 1");
        }
        let consumer_raw =
            u16::from(raw.consumer_low()) | (u16::from(raw.consumer_high().value()) << 8);
        Ok(Self {
            shutter_speed_consumer: if consumer_raw == 0x7FFF { None } else { Some(consumer_raw) },
            shutter_speed_professional_upper_line: if raw.professional_upper_line() == u8::MAX {
                None
            } else {
                Some(raw.professional_upper_line())
            },
            shutter_speed_professional_lower_line: if raw.professional_lower_line() == u8::MAX {
                None
            } else {
                Some(raw.professional_lower_line())
            },
        })
    }
}

impl super::ValidPackDataTrait<CameraShutter> for super::ValidPack<CameraShutter> {
    fn to_raw(&self, _ctx: &super::PackContext) -> super::RawPackData {
        let consumer_raw = self.shutter_speed_consumer.unwrap_or(0x7FFF);
        RawCameraShutter::builder()
            .with_professional_upper_line(
                self.shutter_speed_professional_upper_line.unwrap_or(u8::MAX),
            )
            .with_professional_lower_line(
                self.shutter_speed_professional_lower_line.unwrap_or(u8::MAX),
            )
            .with_consumer_low(u8::try_from(consumer_raw & 0xFF).unwrap())
            .with_consumer_high(u7::new(u8::try_from((consumer_raw >> 8) & 0x7F).unwrap()))
            .with_reserved(u1::new(1))
            .build()
            .raw_value()
            .to_le_bytes()
    }
}
