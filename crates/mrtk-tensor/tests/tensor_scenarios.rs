use mrtk_tensor::{
    AcquisitionAxis, CompareOp, DimensionError, Range, RangeError, Tensor, TensorError,
    TensorLike,
};

fn ramp_3x4() -> Result<Tensor<f32>, TensorError> {
    Tensor::from_shape_fn(&[3, 4], |idx| (idx[0] + 3 * idx[1]) as f32)
}

#[test]
fn numel_dims_and_strides() -> Result<(), TensorError> {
    let dims = [5, 1, 3, 2];
    let t = Tensor::<i16>::new(&dims)?;
    assert_eq!(t.numel(), 30);
    for (i, &d) in dims.iter().enumerate() {
        assert_eq!(t.dim(i), d);
    }
    for axis in dims.len()..16 {
        assert_eq!(t.dim(axis), 1);
    }
    assert_eq!(t.strides(), &[1, 5, 5, 15]);
    Ok(())
}

#[test]
fn acquisition_constructor_reduces_rank() -> Result<(), TensorError> {
    let t = Tensor::<f32>::acquisition(&[4, 3, 1, 1])?;
    assert_eq!(t.rank(), 2);
    assert_eq!(t.dims(), &[4, 3]);
    assert_eq!(t.extent(AcquisitionAxis::Line), 3);
    assert_eq!(t.extent(AcquisitionAxis::Average), 1);

    let mut extents = [1; 16];
    extents[AcquisitionAxis::Slice.index()] = 5;
    let t = Tensor::<f32>::acquisition(&extents)?;
    assert_eq!(t.rank(), 10);
    assert_eq!(t.extent(AcquisitionAxis::Slice), 5);
    Ok(())
}

#[test]
fn flattened_view_read_and_write() -> Result<(), TensorError> {
    let mut t = ramp_3x4()?;
    assert_eq!(t.as_slice()[11], 11.0);

    let v = t.view(&[Range::span(0, 2)?])?;
    assert_eq!(v.to_tensor()?.as_slice(), &[0.0, 1.0, 2.0]);

    t.view_mut(&[Range::span(0, 2)?])?.fill(5.0);
    let reread = t.view(&[Range::span(0, 2)?])?.to_tensor()?;
    assert_eq!(reread.as_slice(), &[5.0, 5.0, 5.0]);
    assert_eq!(t.as_slice()[3], 3.0);
    Ok(())
}

#[test]
fn materialization_equals_direct_reads() -> Result<(), TensorError> {
    let t = Tensor::<i32>::from_shape_fn(&[6, 5, 4], |idx| {
        (idx[0] * 100 + idx[1] * 10 + idx[2]) as i32
    })?;
    let ranges = [
        Range::strided(5, -2, 1)?,
        Range::from_indices(vec![4, 0]),
        Range::all(),
    ];
    let v = t.view(&ranges)?;
    let m = v.to_tensor()?;
    assert_eq!(m.dims(), &[3, 2, 4]);

    let mut i = 0;
    for c in 0..4 {
        for &b in &[4, 0] {
            for &a in &[5, 3, 1] {
                assert_eq!(m[i], *t.get(&[a, b, c])?);
                assert_eq!(m[i], *v.element(i)?);
                i += 1;
            }
        }
    }
    assert_eq!(i, v.numel());
    Ok(())
}

#[test]
fn range_grammar() -> Result<(), TensorError> {
    let r: Range = "0:2".parse()?;
    assert_eq!(r.indices(), &[0, 1, 2]);
    let r: Range = "0:1:6".parse()?;
    assert_eq!(r.indices(), &[0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(
        "".parse::<Range>(),
        Err(RangeError::EmptyRangeSpecification)
    );
    assert_eq!("-1:3".parse::<Range>(), Err(RangeError::NegativeIndex(-1)));
    assert!(matches!(
        "1:2:3:4".parse::<Range>(),
        Err(RangeError::MalformedRangeSpecification(_))
    ));
    assert!(matches!(
        "a:3".parse::<Range>(),
        Err(RangeError::MalformedRangeSpecification(_))
    ));
    Ok(())
}

#[test]
fn elementwise_shape_rules() -> Result<(), TensorError> {
    let a = ramp_3x4()?;
    let b = Tensor::<f32>::from_shape_val(&[4, 3], 1.0)?;
    assert!(matches!(&a + &b, Err(TensorError::ShapeMismatch { .. })));

    let sum = (&a + &a)?;
    for p in 0..a.numel() {
        assert_eq!(sum[p], 2.0 * a[p]);
    }
    Ok(())
}

#[test]
fn identity_cast_and_double_negation() -> Result<(), TensorError> {
    let a = ramp_3x4()?;
    assert_eq!(a.cast::<f32>(), a);
    assert_eq!(-(-&a), a);
    Ok(())
}

#[test]
fn small_matrix_scenario() -> Result<(), TensorError> {
    let a = Tensor::<f32>::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
    assert_eq!(a.view(&[Range::single(1)?])?[0], 2.0);
    assert_eq!((&a * 2.0)[1], 4.0);
    let mask = a.compare_scalar(&2.0, CompareOp::Eq);
    assert_eq!(mask.as_slice(), &[false, true, false, false]);
    assert_eq!(mask.cast::<u8>().as_slice(), &[0, 1, 0, 0]);
    Ok(())
}

#[test]
fn dimension_errors() {
    assert_eq!(
        Tensor::<u8>::new(&[]).err(),
        Some(TensorError::Dimension(DimensionError::EmptyDimensions))
    );
    assert!(matches!(
        Tensor::<u8>::acquisition(&[2, 0]),
        Err(TensorError::Dimension(DimensionError::ZeroExtent { axis: 1 }))
    ));
}

#[test]
fn views_block_reshaping_until_dropped() -> Result<(), TensorError> {
    let mut t = ramp_3x4()?;
    let total: f32 = {
        let v = t.view_str(":, 3")?;
        v.iter().sum()
    };
    assert_eq!(total, 9.0 + 10.0 + 11.0);
    t.resize(&[12])?;
    assert_eq!(t.view_str("9:11")?.iter().sum::<f32>(), total);
    Ok(())
}
