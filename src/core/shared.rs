/// A configuration for the encoder or the decoder.
pub trait ConfigType {
    fn default() -> Self;
}
