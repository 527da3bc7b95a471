/// Type names declared by the mirror language's always-visible core
/// library. A mirrored class with one of these simple names would shadow
/// the built-in one.
pub const STD_CORE_NAMES: &[&str] = &[
    "Any", "ArithmeticException", "Array", "ArrayIterator", "Bool", "Box", "ByteExtension",
    "CPointer", "CPointerHandle", "CPointerResource", "CString", "CStringResource",
    "ConcurrentModificationException", "Countable", "Collection", "Comparable", "Duration",
    "Equal", "Equatable", "Error", "Exception", "Float16", "Float32", "Float64", "Future",
    "Hashable", "Hasher", "IllegalArgumentException", "IllegalFormatException",
    "IllegalMemoryException", "IllegalStateException", "IndexOutOfBoundsException", "Int16",
    "Int32", "Int64", "Int8", "IntNative", "InternalError", "Iterable", "Iterator",
    "Less", "LibC", "NegativeArraySizeException", "NoneValueException", "Nothing", "Object",
    "Option", "Ordering", "OutOfMemoryError", "OverflowException", "Range", "Resource", "Rune",
    "SpawnException", "StackOverflowError", "String", "StringBuilder", "Thread", "ThreadLocal",
    "TimeoutException", "ToString", "UInt16", "UInt32", "UInt64", "UInt8", "UIntNative", "Unit",
    "UnsupportedException", "VArray",
];

pub fn is_std_core_name(name: &str) -> bool {
    STD_CORE_NAMES.contains(&name)
}
