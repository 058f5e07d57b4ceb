use crate::snapshot::ErrorCode;

/// A failure reported by the device-access collaborator, mapped to a stable
/// integer code. The mapping table is supplied by the collaborator; codes
/// must be non-zero (zero is normalized away by the commit protocol).
pub trait DeviceFault {
    fn error_code(&self) -> ErrorCode;
}

/// Synchronous read access to a device point. A single attempt per
/// invocation; the core adds no timeouts or retries, so a hung access stalls
/// that point's polling cycle (the scheduler's concern).
pub trait DeviceReader<T> {
    type Error: DeviceFault;

    fn read_value(&self) -> Result<T, Self::Error>;
}

/// Synchronous write access to a device point.
pub trait DeviceWriter<T> {
    type Error: DeviceFault;

    fn write_value(&self, value: T) -> Result<(), Self::Error>;
}
