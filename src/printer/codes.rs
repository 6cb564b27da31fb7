/// Declare a discriminant field of the protocol.
/// Every byte maps to a value: known codes to their variant, everything else to `Unrecognized`.
/// This keeps newer firmware from breaking the status decoder.
macro_rules! codes {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
            /// A code that is not part of the documented set
            Unrecognized(u8),
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                match value {
                    $($value => $name::$variant,)+
                    other => $name::Unrecognized(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $value,)+
                    $name::Unrecognized(other) => other,
                }
            }
        }

        impl $name {
            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }

            /// The documented name of the code (`None` for unrecognized ones).
            pub fn name(&self) -> Option<&'static str> {
                match self {
                    $($name::$variant => Some(stringify!($variant)),)+
                    $name::Unrecognized(_) => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.name() {
                    Some(name) => write!(f, "{} ({:#04x})", name, u8::from(*self)),
                    None => write!(f, "unrecognized ({:#04x})", u8::from(*self)),
                }
            }
        }
    };
}

codes! {
    pub enum SeriesCode {
        PT = 0x30,
        RJ = 0x37,
    }
}

codes! {
    pub enum ModelCode {
        RJ4030 = 0x31,
        RJ4040 = 0x32,
        RJ3050 = 0x33,
        RJ3150 = 0x34,
        RJ4030Ai = 0x35,
        RJ2030 = 0x36,
        RJ2050 = 0x37,
        RJ2140 = 0x38,
        RJ2150 = 0x39,
        RJ4230B = 0x43,
        RJ4250WB = 0x44,
        RJ3230B = 0x45,
        RJ3250WB = 0x46,

        PT9800PCN = 0x61,
        PT9700PC = 0x62,
        PTH500 = 0x64,
        PTE500 = 0x65,
        PTP700 = 0x67,
        PTP900W = 0x69,
        PTP950NW = 0x70,
        PTP900 = 0x71,
        PTP910BT = 0x78,
    }
}

codes! {
    /// Values above 0x20 are only reported by the PT-P910BT.
    pub enum BatteryLevel {
        Full = 0x00,
        Half = 0x01,
        Low = 0x02,
        NeedCharging = 0x03,
        UsingAC = 0x04,
        FullP910 = 0x20,
        OverChargedP910 = 0x21,
        HalfP910 = 0x22,
        LowP910 = 0x23,
        NeedChargingP910 = 0x24,
        FullACConnectedP910 = 0x30,
        OverChargedACConnectedP910 = 0x31,
        HalfACConnectedP910 = 0x32,
        LowACConnectedP910 = 0x33,
        NeedChargingACConnectedP910 = 0x34,
        BatteryNotInstalledACConnectedP910 = 0x37,
        Unknown = 0xff,
    }
}

codes! {
    pub enum ExtendedError {
        NoError = 0x00,
        FleTapeEnd = 0x10,
        HighResDraftPrintError = 0x1d,
        AdapterPullInsertError = 0x1e,
        IncompatibleMedia = 0x21,
    }
}

codes! {
    pub enum MediaType {
        NoMedia = 0x00,
        LaminatedTape = 0x01,
        NonLaminatedTape = 0x03,
        FabricTape = 0x04,
        HGTape = 0x09,
        HeatShrinkHS2To1 = 0x11,
        FleTape = 0x13,
        FlexIDTape = 0x14,
        SatinTape = 0x15,
        HeatShrinkHS3To1 = 0x17,
        ContinuousLengthTape = 0x4a,
        DieCutLabels = 0x4b,
        Incompatible = 0xff,
    }
}

codes! {
    /// The command mode the printer is currently in.
    pub enum DynamicMode {
        EscP = 0x00,
        Raster = 0x01,
        PTouchTemplate = 0x03,
    }
}

codes! {
    pub enum StatusType {
        ReplyToStatus = 0x00,
        PrintingCompleted = 0x01,
        ErrorOccurred = 0x02,
        ExitIF = 0x03,
        TurnedOff = 0x04,
        Notification = 0x05,
        PhaseChange = 0x06,
        SendAdvancedData = 0xf0,
    }
}

codes! {
    pub enum PhaseType {
        Editing = 0x00,
        Printing = 0x01,
    }
}

codes! {
    pub enum NotificationType {
        NotAvailable = 0x00,
        CoverOpen = 0x01,
        CoverClosed = 0x02,
        CoolingStart = 0x03,
        CoolingFinish = 0x04,
        WaitingForPeeling = 0x05,
    }
}

codes! {
    pub enum TapeColor {
        White = 0x01,
        Other = 0x02,
        Clear = 0x03,
        Red = 0x04,
        Blue = 0x05,
        Yellow = 0x06,
        Green = 0x07,
        Black = 0x08,
        ClearWhiteText = 0x09,
        MatteWhite = 0x20,
        MatteClear = 0x21,
        MatteSilver = 0x22,
        SatinGold = 0x23,
        SatinSilver = 0x24,
        BlueD = 0x30,
        RedD = 0x31,
        FluorescentOrange = 0x40,
        FluorescentYellow = 0x41,
        BerryPinkS = 0x50,
        LightGrayS = 0x51,
        LimeGreenS = 0x52,
        YellowF = 0x60,
        PinkF = 0x61,
        BlueF = 0x62,
        WhiteHeatShrinkTube = 0x70,
        WhiteFlexID = 0x90,
        YellowFlexID = 0x91,
        Cleaning = 0xf0,
        Stencil = 0xf1,
        Incompatible = 0xff,
    }
}

codes! {
    pub enum TextColor {
        White = 0x01,
        Other = 0x02,
        Red = 0x04,
        Blue = 0x05,
        Black = 0x08,
        Gold = 0x0a,
        BlueF = 0x62,
        Cleaning = 0xf0,
        Stencil = 0xf1,
        Incompatible = 0xff,
    }
}

codes! {
    /// Only `NoCompression` is encoded. The raster data is never TIFF-packed.
    pub enum CompressionMode {
        NoCompression = 0x00,
        Tiff = 0x02,
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ErrorInfo1: u8 {
        const NO_MEDIA = 0b0000_0001;
        const END_OF_MEDIA = 0b0000_0010;
        const CUTTER_JAM = 0b0000_0100;
        const WEAK_BATTERIES = 0b0000_1000;
        const PRINTER_IN_USE = 0b0001_0000;
        const PRINTER_TURNED_OFF = 0b0010_0000;
        const HIGH_VOLTAGE_ADAPTER = 0b0100_0000;
        const FAN_MOTOR_ERROR = 0b1000_0000;
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ErrorInfo2: u8 {
        const WRONG_MEDIA = 0b0000_0001;
        const EXPANSION_BUFFER_FULL = 0b0000_0010;
        const COMMUNICATION_ERROR = 0b0000_0100;
        const COMMUNICATION_BUFFER_FULL = 0b0000_1000;
        const COVER_OPEN = 0b0001_0000;
        const OVERHEATING = 0b0010_0000;
        const BLACK_MARK_NOT_FOUND = 0b0100_0000;
        const SYSTEM_ERROR = 0b1000_0000;
    }

    /// Tells the printer which fields of the print information command to check.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ValidFlags: u8 {
        const KIND = 0b0000_0010;
        const WIDTH = 0b0000_0100;
        const LENGTH = 0b0000_1000;
        const QUALITY = 0b0100_0000;
        const RECOVER = 0b1000_0000;
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct PrintSettings: u8 {
        const AUTO_CUT = 0b0100_0000;
        const MIRROR_PRINTING = 0b1000_0000;
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct AdvancedPrintSettings: u8 {
        const NO_CHAIN_PRINTING = 0b0000_1000;
        const SPECIAL_TAPE = 0b0001_0000;
        const NO_BUFFER_CLEARING = 0b1000_0000;
    }
}
