//! Unit model configuration.
//!
//! A [`Config`] describes one floating-point unit model: the
//! instruction generation it implements, the formats and features it
//! reports, and its identity bytes. The architectural registers derive
//! from it at construction time: `FCR0` from the format, feature and
//! identity fields, and the `FCR31` reset value and writable-bit mask
//! from the generation and the 2008 provision.
//!
//! Two presets cover the common cases: [`Config::default`] is a
//! full-featured legacy core and [`Config::release6`] a modern
//! 2008-only core. Deserialized configurations should pass through
//! [`Config::from_json`] so impossible combinations are rejected.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::core::arch::fcr;

/// Writable `FCR31` bits of a legacy model: condition codes, `FS` and
/// the fields below the reserved band.
const LEGACY_RW_MASK: u32 = 0xFF83_FFFF;

/// Writable `FCR31` bits of a release-6 model: `FS` and the fields
/// below the reserved band. The hardwired 2008 bits stay fixed.
const RELEASE6_RW_MASK: u32 = 0x0103_FFFF;

/// Default configuration values.
mod defaults {
    /// Single-precision format available.
    pub const SINGLE: bool = true;
    /// Double-precision format available.
    pub const DOUBLE: bool = true;
    /// Word fixed-point operands available.
    pub const WORD: bool = true;
    /// Long fixed-point operands available.
    pub const LONG: bool = true;
    /// Paired-single format available.
    pub const PAIRED_SINGLE: bool = true;
    /// MIPS-3D extension available.
    pub const MIPS_3D: bool = true;
    /// 64-bit floating-point register file present.
    pub const WIDE_REGISTERS: bool = true;
    /// IEEE 754-2008 NaN handling provision present.
    pub const IEEE_2008: bool = false;
    /// User-mode `Status.FR` switching provision present.
    pub const USER_FR: bool = false;
    /// User-mode `Config5.FRE` switching provision present.
    pub const USER_FRE: bool = false;
    /// Processor identifier byte of the legacy preset.
    pub const PROCESSOR_ID: u8 = 0x82;
    /// Processor identifier byte of the release-6 preset.
    pub const RELEASE6_PROCESSOR_ID: u8 = 0x03;
    /// Implementation revision byte.
    pub const REVISION: u8 = 0x00;
}

/// Instruction set generation of the modelled unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Revision {
    /// Releases up to R5: condition codes, unfused multiply-add, the
    /// optional paired-single and MIPS-3D extensions.
    #[default]
    Legacy,
    /// Release 6: mask comparisons, fused multiply-add, hardwired 2008
    /// behavior, paired-single removed.
    #[serde(alias = "R6")]
    Release6,
}

/// Floating-point format availability, reported in `FCR0`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FormatSupport {
    /// Single-precision (`.s`) operations.
    #[serde(default = "FormatSupport::default_single")]
    pub single: bool,
    /// Double-precision (`.d`) operations.
    #[serde(default = "FormatSupport::default_double")]
    pub double: bool,
    /// 32-bit word (`.w`) fixed-point operands.
    #[serde(default = "FormatSupport::default_word")]
    pub word: bool,
    /// 64-bit long (`.l`) fixed-point operands.
    #[serde(default = "FormatSupport::default_long")]
    pub long: bool,
    /// Paired-single (`.ps`) operations.
    #[serde(default = "FormatSupport::default_paired_single")]
    pub paired_single: bool,
}

impl FormatSupport {
    fn default_single() -> bool {
        defaults::SINGLE
    }

    fn default_double() -> bool {
        defaults::DOUBLE
    }

    fn default_word() -> bool {
        defaults::WORD
    }

    fn default_long() -> bool {
        defaults::LONG
    }

    fn default_paired_single() -> bool {
        defaults::PAIRED_SINGLE
    }
}

impl Default for FormatSupport {
    fn default() -> Self {
        Self {
            single: defaults::SINGLE,
            double: defaults::DOUBLE,
            word: defaults::WORD,
            long: defaults::LONG,
            paired_single: defaults::PAIRED_SINGLE,
        }
    }
}

/// Feature provisions, reported in `FCR0`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FeatureSupport {
    /// MIPS-3D approximation steps and absolute-value compares.
    #[serde(default = "FeatureSupport::default_mips_3d")]
    pub mips_3d: bool,
    /// 64-bit floating-point register file (`FCR0.F64`).
    #[serde(default = "FeatureSupport::default_wide_registers")]
    pub wide_registers: bool,
    /// IEEE 754-2008 NaN handling provision (`FCR0.Has2008`).
    #[serde(default = "FeatureSupport::default_ieee_2008")]
    pub ieee_2008: bool,
    /// User-mode `Status.FR` switching provision (`FCR0.UFRP`).
    #[serde(default = "FeatureSupport::default_user_fr")]
    pub user_fr: bool,
    /// User-mode `Config5.FRE` switching provision (`FCR0.FREP`).
    #[serde(default = "FeatureSupport::default_user_fre")]
    pub user_fre: bool,
}

impl FeatureSupport {
    fn default_mips_3d() -> bool {
        defaults::MIPS_3D
    }

    fn default_wide_registers() -> bool {
        defaults::WIDE_REGISTERS
    }

    fn default_ieee_2008() -> bool {
        defaults::IEEE_2008
    }

    fn default_user_fr() -> bool {
        defaults::USER_FR
    }

    fn default_user_fre() -> bool {
        defaults::USER_FRE
    }
}

impl Default for FeatureSupport {
    fn default() -> Self {
        Self {
            mips_3d: defaults::MIPS_3D,
            wide_registers: defaults::WIDE_REGISTERS,
            ieee_2008: defaults::IEEE_2008,
            user_fr: defaults::USER_FR,
            user_fre: defaults::USER_FRE,
        }
    }
}

/// Identity bytes reported in `FCR0`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Identity {
    /// Processor identifier (`FCR0.PRID`).
    #[serde(default = "Identity::default_processor_id")]
    pub processor_id: u8,
    /// Implementation revision (`FCR0.REV`).
    #[serde(default = "Identity::default_revision")]
    pub revision: u8,
}

impl Identity {
    fn default_processor_id() -> u8 {
        defaults::PROCESSOR_ID
    }

    fn default_revision() -> u8 {
        defaults::REVISION
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            processor_id: defaults::PROCESSOR_ID,
            revision: defaults::REVISION,
        }
    }
}

/// Complete description of one floating-point unit model.
///
/// # Examples
///
/// ```
/// use mipsfpu_core::Config;
///
/// let config = Config::from_json(
///     r#"{
///         "revision": "Release6",
///         "formats": { "paired_single": false },
///         "features": { "mips_3d": false, "ieee_2008": true, "user_fre": true }
///     }"#,
/// )
/// .unwrap();
/// assert!(config.is_release6());
/// assert_ne!(config.fcr31_reset(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Instruction set generation.
    #[serde(default)]
    pub revision: Revision,
    /// Format availability.
    #[serde(default)]
    pub formats: FormatSupport,
    /// Feature provisions.
    #[serde(default)]
    pub features: FeatureSupport,
    /// Identity bytes.
    #[serde(default)]
    pub identity: Identity,
}

impl Config {
    /// Builds the release-6 preset: every scalar format, 2008 behavior
    /// hardwired, the user-mode `FRE` provision, no paired-single.
    pub fn release6() -> Self {
        Self {
            revision: Revision::Release6,
            formats: FormatSupport {
                paired_single: false,
                ..FormatSupport::default()
            },
            features: FeatureSupport {
                mips_3d: false,
                ieee_2008: true,
                user_fre: true,
                ..FeatureSupport::default()
            },
            identity: Identity {
                processor_id: defaults::RELEASE6_PROCESSOR_ID,
                revision: defaults::REVISION,
            },
        }
    }

    /// Parses a configuration from JSON and validates it.
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for combinations no model can have.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field consistency.
    ///
    /// Returns [`ConfigError::Invalid`] naming the first impossible
    /// combination found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_release6() && (self.formats.paired_single || self.features.mips_3d) {
            return Err(ConfigError::Invalid(
                "release 6 removed the paired-single format and MIPS-3D".into(),
            ));
        }
        if self.formats.paired_single && !self.features.wide_registers {
            return Err(ConfigError::Invalid(
                "paired-single operands need the 64-bit register file".into(),
            ));
        }
        if self.features.user_fre && !self.features.ieee_2008 {
            return Err(ConfigError::Invalid(
                "the FRE provision requires 2008 support".into(),
            ));
        }
        Ok(())
    }

    /// True when the model implements the release-6 instruction set.
    pub fn is_release6(&self) -> bool {
        self.revision == Revision::Release6
    }

    /// Derives the `FCR0` implementation register.
    pub fn fcr0(&self) -> u32 {
        let mut fcr0 = (u32::from(self.identity.revision) << fcr::FCR0_REV_SHIFT)
            | (u32::from(self.identity.processor_id) << fcr::FCR0_PRID_SHIFT);
        if self.formats.single {
            fcr0 |= fcr::FCR0_S;
        }
        if self.formats.double {
            fcr0 |= fcr::FCR0_D;
        }
        if self.formats.word {
            fcr0 |= fcr::FCR0_W;
        }
        if self.formats.long {
            fcr0 |= fcr::FCR0_L;
        }
        if self.formats.paired_single {
            fcr0 |= fcr::FCR0_PS;
        }
        if self.features.mips_3d {
            fcr0 |= fcr::FCR0_3D;
        }
        if self.features.wide_registers {
            fcr0 |= fcr::FCR0_F64;
        }
        if self.features.ieee_2008 {
            fcr0 |= fcr::FCR0_HAS2008;
        }
        if self.features.user_fr {
            fcr0 |= fcr::FCR0_UFRP;
        }
        if self.features.user_fre {
            fcr0 |= fcr::FCR0_FREP;
        }
        fcr0
    }

    /// Derives the `FCR31` power-on value.
    ///
    /// Models with 2008 behavior come up with `NAN2008` and `ABS2008`
    /// set; release 6 additionally hardwires them, since its write
    /// mask excludes both bits.
    pub fn fcr31_reset(&self) -> u32 {
        if self.is_release6() || self.features.ieee_2008 {
            fcr::FCR31_NAN2008 | fcr::FCR31_ABS2008
        } else {
            0
        }
    }

    /// Derives the writable-bit mask for moves to register index 31.
    pub fn fcr31_rw_mask(&self) -> u32 {
        match self.revision {
            Revision::Legacy => LEGACY_RW_MASK,
            Revision::Release6 => RELEASE6_RW_MASK,
        }
    }
}
