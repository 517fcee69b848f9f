use bytevm_core::builtins::{byte, byte_array};
use bytevm_core::{
    invoke, Builtin, CallFrame, DestOperand, Frame, Operand, Output, TypeTag, Value, VmConfig,
    VmError,
};

fn frame(size: usize) -> Frame {
    Frame::new(&VmConfig::new(), size).expect("frame")
}

fn array(elements: &[u8]) -> Value {
    Value::byte_array(elements).expect("array")
}

fn read_at(arr: &Value, index: i32) -> Result<u8, VmError> {
    let mut f = frame(1);
    let idx = Value::i32(index);
    byte_array::read(Operand::new(arr), Operand::new(&idx), Output::new(&mut f, 0))?;
    Ok(f.load(0)?.as_byte()?)
}

fn write_at(arr: &Value, index: i32, value: u8) -> Result<Value, VmError> {
    let mut f = frame(1);
    let (idx, val) = (Value::i32(index), Value::byte(value));
    byte_array::write(
        Operand::new(arr),
        Operand::new(&idx),
        Operand::new(&val),
        Output::new(&mut f, 0),
    )?;
    f.load(0)
}

fn concat(a: &Value, b: &Value) -> Value {
    let mut f = frame(1);
    byte_array::concat(Operand::new(a), Operand::new(b), Output::new(&mut f, 0)).expect("concat");
    f.load(0).expect("output")
}

fn len(arr: &Value) -> i32 {
    let mut f = frame(1);
    byte_array::len(Operand::new(arr), Output::new(&mut f, 0)).expect("len");
    f.load(0).and_then(|v| v.as_i32()).expect("i32 output")
}

#[test]
fn read_of_write_yields_written_value() {
    let arr = array(&[10, 11, 12, 13]);
    for i in 0..4 {
        for v in [0u8, 1, 127, 128, 255] {
            let written = write_at(&arr, i, v).unwrap();
            assert_eq!(read_at(&written, i).unwrap(), v);
        }
    }
}

#[test]
fn write_only_touches_its_index() {
    let arr = array(&[10, 11, 12, 13]);
    for i in 0..4 {
        let written = write_at(&arr, i, 99).unwrap();
        assert_eq!(len(&written), 4);
        for j in (0..4).filter(|&j| j != i) {
            assert_eq!(read_at(&written, j).unwrap(), read_at(&arr, j).unwrap());
        }
    }
}

#[test]
fn write_never_mutates_the_original_buffer() {
    let mut f = frame(4);
    f.store(0, array(&[1, 2, 3])).unwrap();
    let alias = f.load(0).unwrap();
    f.store(1, alias).unwrap(); // second variable aliasing slot 0
    f.store(2, Value::i32(1)).unwrap();
    f.store(3, Value::byte(42)).unwrap();

    let pre_call = f.load(0).unwrap();
    invoke(Builtin::ByteArrayWrite, &mut f, &[0, 2, 3], 0).unwrap();

    assert_eq!(f.load(0).unwrap().as_byte_array().unwrap(), vec![1, 42, 3]);
    assert_eq!(f.load(1).unwrap().as_byte_array().unwrap(), vec![1, 2, 3]);
    assert_eq!(pre_call.to_bytes(), vec![3, 0, 0, 0, 1, 2, 3]);
}

#[test]
fn concat_lengths_add_up_and_order_is_preserved() {
    let a = array(&[1, 2]);
    let b = array(&[3]);
    let c = array(&[4, 5, 6]);

    let ab = concat(&a, &b);
    assert_eq!(len(&ab), len(&a) + len(&b));
    assert_eq!(ab.as_byte_array().unwrap(), vec![1, 2, 3]);

    let left = concat(&ab, &c);
    let right = concat(&a, &concat(&b, &c));
    assert_eq!(left, right);
    assert_eq!(left.as_byte_array().unwrap(), vec![1, 2, 3, 4, 5, 6]);

    let empty = array(&[]);
    assert_eq!(concat(&empty, &a), a);
    assert_eq!(concat(&a, &empty), a);
}

#[test]
fn append_grows_by_one_with_value_last() {
    let arr = array(&[5, 6, 7]);
    let val = Value::byte(200);
    let mut f = frame(1);
    byte_array::append(Operand::new(&arr), Operand::new(&val), Output::new(&mut f, 0)).unwrap();
    let grown = f.load(0).unwrap();

    assert_eq!(len(&grown), len(&arr) + 1);
    assert_eq!(read_at(&grown, len(&arr)).unwrap(), 200);
    assert_eq!(arr.as_byte_array().unwrap(), vec![5, 6, 7]);
}

#[test]
fn bad_indices_fail_and_leave_operands_alone() {
    for builtin in [Builtin::ByteArrayRead, Builtin::ByteArrayWrite] {
        for (index, expected) in [
            (-1, VmError::NegativeIndex { operator: builtin.name(), index: -1 }),
            (i32::MIN, VmError::NegativeIndex { operator: builtin.name(), index: i32::MIN }),
            (3, VmError::IndexOutOfRange { operator: builtin.name(), index: 3, len: 3 }),
            (i32::MAX, VmError::IndexOutOfRange { operator: builtin.name(), index: i32::MAX, len: 3 }),
        ] {
            let mut f = frame(4);
            f.store(0, array(&[1, 2, 3])).unwrap();
            f.store(1, Value::i32(index)).unwrap();
            f.store(2, Value::byte(9)).unwrap();
            f.store(3, Value::bool(false)).unwrap();

            let args: &[usize] = match builtin {
                Builtin::ByteArrayRead => &[0, 1],
                _ => &[0, 1, 2],
            };
            let err = invoke(builtin, &mut f, args, 3).unwrap_err();
            assert_eq!(err, expected);

            assert_eq!(f.load(0).unwrap().as_byte_array().unwrap(), vec![1, 2, 3]);
            assert_eq!(f.load(1).unwrap().as_i32().unwrap(), index);
            assert_eq!(f.load(2).unwrap().as_byte().unwrap(), 9);
            // output slot untouched
            assert_eq!(f.load(3).unwrap(), Value::bool(false));
        }
    }
}

#[test]
fn empty_array_rejects_every_index() {
    let empty = array(&[]);
    assert_eq!(
        read_at(&empty, 0).unwrap_err(),
        VmError::IndexOutOfRange { operator: "[]byte.read", index: 0, len: 0 }
    );
    assert!(write_at(&empty, 0, 1).is_err());
}

#[test]
fn copy_into_longer_destination_keeps_its_tail() {
    let dst = array(&[1, 2, 3, 4, 5]);
    let alias = dst.clone();
    let src = array(&[7, 8, 9]);

    byte_array::copy(DestOperand::new(&dst), Operand::new(&src)).expect("copy is infallible here");

    assert_eq!(dst.as_byte_array().unwrap(), vec![7, 8, 9, 4, 5]);
    // in-place: the alias sees it too
    assert_eq!(alias.as_byte_array().unwrap(), vec![7, 8, 9, 4, 5]);
    assert_eq!(src.as_byte_array().unwrap(), vec![7, 8, 9]);
}

#[test]
fn copy_from_longer_source_truncates_silently() {
    let dst = array(&[0; 5]);
    let src = array(&[1, 2, 3, 4, 5, 6, 7]);

    byte_array::copy(DestOperand::new(&dst), Operand::new(&src)).expect("no error on mismatch");

    assert_eq!(dst.as_byte_array().unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(len(&dst), 5);
}

#[test]
fn copy_with_empty_side_changes_nothing() {
    let dst = array(&[1, 2]);
    byte_array::copy(DestOperand::new(&dst), Operand::new(&array(&[]))).unwrap();
    assert_eq!(dst.as_byte_array().unwrap(), vec![1, 2]);

    let empty = array(&[]);
    byte_array::copy(DestOperand::new(&empty), Operand::new(&dst)).unwrap();
    assert_eq!(empty.to_bytes(), vec![0, 0, 0, 0]);
}

#[test]
fn scalar_comparisons_of_distinct_bytes() {
    let got = comparisons(3, 7);
    assert_eq!(got, [true, false, false, true, true, false]);
}

#[test]
fn scalar_comparisons_of_equal_bytes() {
    let [lt, gt, eq, uneq, lteq, gteq] = comparisons(5, 5);
    assert!(!lt);
    assert!(!gt);
    assert!(eq);
    assert!(!uneq);
    assert!(lteq);
    assert!(gteq);
}

/// `[lt, gt, eq, uneq, lteq, gteq]` for `x` against `y`
fn comparisons(x: u8, y: u8) -> [bool; 6] {
    type Cmp = fn(Operand<'_>, Operand<'_>, Output<'_>) -> Result<(), VmError>;
    let ops: [Cmp; 6] = [byte::lt, byte::gt, byte::eq, byte::uneq, byte::lteq, byte::gteq];
    let (a, b) = (Value::byte(x), Value::byte(y));
    let mut out = [false; 6];
    for (slot, op) in out.iter_mut().zip(ops) {
        let mut f = frame(1);
        op(Operand::new(&a), Operand::new(&b), Output::new(&mut f, 0)).unwrap();
        *slot = f.load(0).unwrap().as_bool().unwrap();
    }
    out
}

/// A value of the wrong kind whose buffer would decode as garbage (or
/// panic) if an operator interpreted it before checking the tag.
fn impostor(tag: TypeTag) -> Value {
    let bytes = match tag {
        // a scalar byte where an array is expected would be too short to
        // carry a length prefix
        TypeTag::Byte => vec![0xFF],
        // an array prefix claiming far more elements than present
        TypeTag::ByteArray => vec![0xFF, 0xFF, 0xFF, 0x7F],
        TypeTag::I32 => vec![1, 2],
        TypeTag::Bool => vec![9],
    };
    Value::from_encoded(tag, bytes)
}

fn well_formed(tag: TypeTag) -> Value {
    match tag {
        TypeTag::Byte => Value::byte(1),
        TypeTag::ByteArray => array(&[1, 2, 3]),
        TypeTag::I32 => Value::i32(0),
        TypeTag::Bool => Value::bool(true),
    }
}

#[test]
fn type_gate_rejects_wrong_kinds_for_every_builtin() {
    let kinds = [TypeTag::Byte, TypeTag::ByteArray, TypeTag::I32, TypeTag::Bool];

    for builtin in Builtin::ALL {
        let params = builtin.params();
        for (position, &expected) in params.iter().enumerate() {
            for wrong in kinds.into_iter().filter(|&k| k != expected) {
                let mut f = frame(params.len() + 1);
                for (i, &tag) in params.iter().enumerate() {
                    let value = if i == position { impostor(wrong) } else { well_formed(tag) };
                    f.store(i, value).unwrap();
                }
                let args: Vec<usize> = (0..params.len()).collect();
                let out = params.len();
                let before: Vec<Vec<u8>> = args.iter().map(|&i| f.load(i).unwrap().to_bytes()).collect();

                let err = invoke(builtin, &mut f, &args, out).unwrap_err();

                assert_eq!(
                    err,
                    VmError::TypeMismatch {
                        operator: builtin.name(),
                        position: position + 1,
                        expected,
                        actual: wrong,
                    },
                    "{} with {} at argument {}",
                    builtin.name(),
                    wrong,
                    position + 1
                );
                let after: Vec<Vec<u8>> = args.iter().map(|&i| f.load(i).unwrap().to_bytes()).collect();
                assert_eq!(before, after);
                assert_eq!(f.load(out).unwrap_err(), VmError::EmptySlot(out));
            }
        }
    }
}

#[test]
fn scalar_passed_as_array_is_a_type_error() {
    let mut f = frame(1);
    let scalar = Value::byte(4);
    let err = byte_array::len(Operand::new(&scalar), Output::new(&mut f, 0)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "[]byte.len: argument 1 is type 'byte'; expected type '[]byte'"
    );
}

#[test]
fn output_limit_applies_to_growth() {
    let config = VmConfig::new().with_max_value_bytes(7);
    let mut f = Frame::new(&config, 3).unwrap();
    f.store(0, array(&[1, 2, 3])).unwrap();
    f.store(1, Value::byte(4)).unwrap();

    let err = invoke(Builtin::ByteArrayAppend, &mut f, &[0, 1], 2).unwrap_err();
    assert_eq!(err, VmError::OutOfMemory { size: 8, limit: 7 });
    assert_eq!(f.load(2).unwrap_err(), VmError::EmptySlot(2));
}
